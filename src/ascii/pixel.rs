//! Cell grid shared by every pipeline stage.

use std::ops::{Index, IndexMut};

/// Glyph assigned to a grid cell.
///
/// `Block` means "no glyph": the raster writer paints the whole cell with the
/// cell color instead of drawing a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Glyph {
    /// Solid color block (no character)
    #[default]
    Block,
    /// A single character drawn with the font
    Char(char),
}

impl Glyph {
    /// The space character.
    pub const SPACE: Glyph = Glyph::Char(' ');

    /// True for the block sentinel and for the space character.
    ///
    /// Blank glyphs never override a tone glyph during composition.
    pub fn is_blank(self) -> bool {
        matches!(self, Glyph::Block | Glyph::Char(' '))
    }

    /// Character used when the glyph is written as text.
    pub fn as_char(self) -> char {
        match self {
            Glyph::Block => ' ',
            Glyph::Char(c) => c,
        }
    }
}

impl From<char> for Glyph {
    fn from(c: char) -> Self {
        Glyph::Char(c)
    }
}

/// One grid cell: RGBA color plus its assigned glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub glyph: Glyph,
}

impl Pixel {
    /// Create a pixel with no glyph assigned.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            glyph: Glyph::Block,
        }
    }

    /// Opaque-or-not gray pixel with R = G = B = `value`.
    pub const fn gray(value: u8, a: u8) -> Self {
        Self::rgba(value, value, value, a)
    }

    /// Channels in R, G, B, A order.
    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same glyph, new channels.
    pub fn with_channels(self, [r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a, ..self }
    }
}

/// Errors raised when a grid would violate the rectangular invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{found} pixels cannot fill a {width}x{height} grid")]
    DimensionMismatch {
        width: usize,
        height: usize,
        found: usize,
    },

    #[error("grid is {found_width}x{found_height}, expected {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
}

/// Rectangular grid of pixels stored in row-major order.
///
/// Dimensions are fixed once constructed and are never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Grid of default (transparent black, no glyph) pixels.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::filled(width, height, Pixel::default())
    }

    /// Grid where every cell is a copy of `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        })
    }

    /// Build a grid from row-major pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if pixels.len() != width * height {
            return Err(GridError::DimensionMismatch {
                width,
                height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from nested rows, rejecting empty and ragged input.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let mut pixels = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            pixels.extend(cells);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Same dimensions, every cell set to `pixel`.
    pub(crate) fn same_size(&self, pixel: Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: vec![pixel; self.pixels.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Pixel> {
        if x < self.width && y < self.height {
            self.pixels.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.width)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Glyphs in row-major order.
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.pixels.iter().map(|p| p.glyph)
    }
}

/// Index by `(row, column)`.
impl Index<(usize, usize)> for PixelGrid {
    type Output = Pixel;

    fn index(&self, (row, col): (usize, usize)) -> &Pixel {
        assert!(col < self.width, "column {} out of bounds", col);
        &self.pixels[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for PixelGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Pixel {
        assert!(col < self.width, "column {} out of bounds", col);
        &mut self.pixels[row * self.width + col]
    }
}
