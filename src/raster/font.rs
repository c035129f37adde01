//! TrueType glyph painter backed by fontdue.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};
use image::{Rgba, RgbaImage};

use super::writer::{blend_pixel, GlyphPainter};
use super::RasterError;

/// Rasterizes characters at the cell size and alpha-blends their coverage.
///
/// Bitmaps are cached per character since a composed grid only uses a
/// handful of distinct glyphs.
pub struct FontPainter {
    font: Font,
    px: f32,
    /// Baseline offset from the top of a cell, in pixels
    baseline: f32,
    cache: HashMap<char, (Metrics, Vec<u8>)>,
}

impl FontPainter {
    /// Parse a font from raw TTF/OTF bytes for cells of `letter_size` pixels.
    pub fn from_bytes(bytes: &[u8], letter_size: u32) -> Result<Self, RasterError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| RasterError::Font(e.to_string()))?;

        let px = letter_size as f32;
        let baseline = match font.horizontal_line_metrics(px) {
            Some(m) if m.ascent - m.descent > 0.0 => px * m.ascent / (m.ascent - m.descent),
            _ => px * 0.8,
        };

        Ok(Self {
            font,
            px,
            baseline,
            cache: HashMap::new(),
        })
    }

    /// Load a font file from disk.
    pub fn load(path: &Path, letter_size: u32) -> Result<Self, RasterError> {
        let bytes = std::fs::read(path)
            .map_err(|e| RasterError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes, letter_size)
    }
}

impl GlyphPainter for FontPainter {
    fn draw_glyph(
        &mut self,
        canvas: &mut RgbaImage,
        x: u32,
        y: u32,
        size: u32,
        ch: char,
        color: Rgba<u8>,
    ) {
        if ch.is_whitespace() {
            return;
        }

        let font = &self.font;
        let px = self.px;
        let (metrics, bitmap) = self
            .cache
            .entry(ch)
            .or_insert_with(|| font.rasterize(ch, px));

        let (cell_x, cell_y, size) = (x as i64, y as i64, size as i64);
        let (width, height) = (metrics.width as i64, metrics.height as i64);

        // Bitmap rows run top-down from ymin + height above the baseline.
        // Glyphs that spill past the cell (descenders, underscores) are
        // shifted back inside it when they fit, then clipped to the cell.
        let top = cell_y + self.baseline.round() as i64 - metrics.ymin as i64 - height;
        let top = top.min(cell_y + size - height).max(cell_y);
        let left = (cell_x + metrics.xmin as i64)
            .min(cell_x + size - width)
            .max(cell_x);

        for row in 0..metrics.height {
            let py = top + row as i64;
            if py >= cell_y + size {
                break;
            }
            for col in 0..metrics.width {
                let cx = left + col as i64;
                if cx >= cell_x + size {
                    break;
                }
                let coverage = bitmap[row * metrics.width + col];
                // Clipped to the canvas by blend_pixel
                blend_pixel(canvas, cx as u32, py as u32, color, coverage);
            }
        }
    }
}
