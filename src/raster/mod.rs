//! Rendering composed grids onto a raster canvas.
//!
//! [`GlyphRasterWriter`] walks the grid with a [`RasterCursor`], filling
//! block cells with their color and handing character cells to a
//! [`GlyphPainter`]. [`FontPainter`] is the painter backed by a TrueType font.

mod cursor;
mod font;
mod writer;

pub use cursor::RasterCursor;
pub use font::FontPainter;
pub use writer::{blend_pixel, ColorMode, GlyphPainter, GlyphRasterWriter};

/// Errors that can occur while rendering to a canvas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// The cursor moved past the bottom of the canvas
    #[error("draw overflow, y is {y}")]
    Overflow { y: u32 },

    /// The font file could not be parsed
    #[error("failed to load font: {0}")]
    Font(String),

    #[error("letter size must be at least 1")]
    ZeroLetterSize,

    /// Canvas dimensions do not fit in `u32`
    #[error("canvas for a {width} x {height} grid at letter size {letter_size} is too large")]
    CanvasTooLarge {
        width: usize,
        height: usize,
        letter_size: u32,
    },
}
