//! Brightness to glyph mapping (tone stage).

use super::charset::{GLYPH_RAMP, RAMP_LEVELS};
use super::grayscale::normalized_luminance;
use super::pixel::{Glyph, Pixel, PixelGrid};

/// Luminance bucket (0-9) of a pixel.
///
/// Computed as `clamp(floor(L / 255 * 10), 0, 9)`, so only pure white
/// reaches the top bucket through the clamp.
#[inline]
pub fn luminance_bucket(pixel: &Pixel) -> usize {
    let n = normalized_luminance(pixel);
    let bucket = (n * RAMP_LEVELS as f64).floor();
    (bucket.max(0.0) as usize).min(RAMP_LEVELS - 1)
}

/// Tone glyph for a pixel.
#[inline]
pub fn tone_glyph(pixel: &Pixel) -> char {
    GLYPH_RAMP[luminance_bucket(pixel)]
}

/// Assign a tone glyph to every cell of the grid.
///
/// Only the glyph field is written; color channels are left untouched.
pub fn map_luminance(grid: &mut PixelGrid) {
    for pixel in grid.pixels_mut() {
        pixel.glyph = Glyph::Char(tone_glyph(pixel));
    }
}
