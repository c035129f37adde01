//! Separable Gaussian blur.
//!
//! The 2-D Gaussian is applied as a horizontal 1-D pass followed by a
//! vertical one. Samples outside the grid are clamped to the nearest edge
//! cell, so every output pixel sees the full kernel weight and borders do
//! not darken.

use super::kernel::{Kernel1D, KernelSize};
use super::pixel::PixelGrid;

type Accum = [f64; 4];

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Blur every RGBA channel with a Gaussian of the given size.
///
/// Glyphs are copied from the source grid unchanged.
pub fn blur(grid: &PixelGrid, size: KernelSize) -> PixelGrid {
    let kernel = Kernel1D::gaussian(size);
    blur_with(grid, &kernel)
}

/// Blur with a prebuilt kernel.
pub fn blur_with(grid: &PixelGrid, kernel: &Kernel1D) -> PixelGrid {
    let width = grid.width();
    let height = grid.height();
    let radius = kernel.radius() as isize;
    let weights = kernel.weights();
    let src = grid.pixels();

    // Horizontal pass, kept in f64 so the second pass does not round twice
    let mut tmp: Vec<Accum> = vec![[0.0; 4]; width * height];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = [0.0; 4];
            for k in -radius..=radius {
                let p = &row[clamp_index(x as isize + k, width)];
                let w = weights[(k + radius) as usize];
                for (a, c) in acc.iter_mut().zip(p.channels()) {
                    *a += c as f64 * w;
                }
            }
            tmp[y * width + x] = acc;
        }
    }

    // Vertical pass
    let mut out = grid.clone();
    for (i, pixel) in out.pixels_mut().iter_mut().enumerate() {
        let (y, x) = (i / width, i % width);
        let mut acc = [0.0; 4];
        for k in -radius..=radius {
            let sample = &tmp[clamp_index(y as isize + k, height) * width + x];
            let w = weights[(k + radius) as usize];
            for (a, c) in acc.iter_mut().zip(sample) {
                *a += c * w;
            }
        }
        *pixel = pixel.with_channels(acc.map(to_channel));
    }

    out
}
