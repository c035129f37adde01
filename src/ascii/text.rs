//! Plain-text serialization of a composed grid.

use super::pixel::PixelGrid;

/// Render glyphs as text: one line per row, glyphs separated by a single
/// space, every line terminated by `\n`. Block cells are written as spaces.
pub fn to_text(grid: &PixelGrid) -> String {
    let mut out = String::with_capacity(grid.width() * grid.height() * 2);
    for row in grid.rows() {
        for (i, pixel) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(pixel.glyph.as_char());
        }
        out.push('\n');
    }
    out
}
