//! Glyph placement onto an RGBA canvas.

use image::{Rgba, RgbaImage};

use super::cursor::RasterCursor;
use super::RasterError;
use crate::ascii::{Glyph, Pixel, PixelGrid};

/// Draws a single character into a cell of the canvas.
pub trait GlyphPainter {
    /// Draw `ch` in `color` into the `size x size` cell whose top-left corner
    /// is `(x, y)`.
    fn draw_glyph(
        &mut self,
        canvas: &mut RgbaImage,
        x: u32,
        y: u32,
        size: u32,
        ch: char,
        color: Rgba<u8>,
    );
}

/// Color used for glyph strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Each glyph takes the color of its cell
    #[default]
    Color,
    /// Every glyph is drawn in one foreground color
    Monochrome(Rgba<u8>),
}

/// Blend `color` over the canvas pixel with `coverage` (0-255).
pub fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, coverage: u8) {
    if x >= canvas.width() || y >= canvas.height() || coverage == 0 {
        return;
    }
    let alpha = coverage as u32 * color.0[3] as u32 / 255;
    let dst = canvas.get_pixel_mut(x, y);
    for i in 0..3 {
        let blended = (color.0[i] as u32 * alpha + dst.0[i] as u32 * (255 - alpha)) / 255;
        dst.0[i] = blended as u8;
    }
    dst.0[3] = dst.0[3].max(alpha as u8);
}

/// Sequentially places grid glyphs on a canvas.
pub struct GlyphRasterWriter<P> {
    canvas: RgbaImage,
    painter: P,
    letter_size: u32,
    mode: ColorMode,
}

impl<P: GlyphPainter> GlyphRasterWriter<P> {
    /// Canvas sized `(grid width * letter_size) x (grid height * letter_size)`
    /// and cleared to `background`.
    pub fn for_grid(
        grid: &PixelGrid,
        letter_size: u32,
        background: Rgba<u8>,
        painter: P,
    ) -> Result<Self, RasterError> {
        if letter_size == 0 {
            return Err(RasterError::ZeroLetterSize);
        }
        let scale = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|n| n.checked_mul(letter_size))
        };
        let (width, height) = match (scale(grid.width()), scale(grid.height())) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(RasterError::CanvasTooLarge {
                    width: grid.width(),
                    height: grid.height(),
                    letter_size,
                })
            }
        };
        let canvas = RgbaImage::from_pixel(width, height, background);
        Self::with_canvas(canvas, letter_size, painter)
    }

    /// Render onto an existing canvas.
    pub fn with_canvas(
        canvas: RgbaImage,
        letter_size: u32,
        painter: P,
    ) -> Result<Self, RasterError> {
        if letter_size == 0 {
            return Err(RasterError::ZeroLetterSize);
        }
        Ok(Self {
            canvas,
            painter,
            letter_size,
            mode: ColorMode::Color,
        })
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fresh cursor at the top-left of the canvas.
    pub fn cursor(&self) -> RasterCursor {
        RasterCursor::new(self.canvas.width(), self.canvas.height(), self.letter_size)
    }

    /// Write one cell at the cursor and advance it.
    ///
    /// Block glyphs fill the whole cell with the cell color, in both color
    /// modes. Character glyphs are drawn by the painter in the cell color,
    /// or in the foreground color when monochrome.
    pub fn write_pixel(
        &mut self,
        cursor: &mut RasterCursor,
        pixel: &Pixel,
    ) -> Result<(), RasterError> {
        let (x, y) = cursor.next_cell()?;
        let cell_color = Rgba(pixel.channels());

        match pixel.glyph {
            Glyph::Block => self.fill_cell(x, y, cell_color),
            Glyph::Char(ch) => {
                let color = match self.mode {
                    ColorMode::Color => cell_color,
                    ColorMode::Monochrome(fg) => fg,
                };
                self.painter
                    .draw_glyph(&mut self.canvas, x, y, self.letter_size, ch, color);
            }
        }
        Ok(())
    }

    /// Write every cell of the grid in row-major order.
    ///
    /// Stops at the first error; cells written before it stay on the canvas.
    pub fn write_grid(&mut self, grid: &PixelGrid) -> Result<(), RasterError> {
        let mut cursor = self.cursor();
        for pixel in grid.pixels() {
            self.write_pixel(&mut cursor, pixel)?;
        }
        Ok(())
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }

    fn fill_cell(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let end_x = (x + self.letter_size).min(self.canvas.width());
        let end_y = (y + self.letter_size).min(self.canvas.height());
        for py in y..end_y {
            for px in x..end_x {
                self.canvas.put_pixel(px, py, color);
            }
        }
    }
}
