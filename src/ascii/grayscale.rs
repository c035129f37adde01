//! RGB to luminance conversion using the ITU-R BT.709 coefficients.

use super::pixel::Pixel;

/// Red weight of the luminance formula.
pub const LUMA_R: f64 = 0.2126;
/// Green weight of the luminance formula.
pub const LUMA_G: f64 = 0.7152;
/// Blue weight of the luminance formula.
pub const LUMA_B: f64 = 0.0722;

/// Perceptual luminance of a pixel in the range 0-255.
///
/// The formula is: L = 0.2126*R + 0.7152*G + 0.0722*B
///
/// Alpha is ignored.
#[inline]
pub fn luminance(pixel: &Pixel) -> f64 {
    LUMA_R * pixel.r as f64 + LUMA_G * pixel.g as f64 + LUMA_B * pixel.b as f64
}

/// Luminance normalized to [0, 1].
#[inline]
pub fn normalized_luminance(pixel: &Pixel) -> f64 {
    luminance(pixel) / 255.0
}
