//! Sobel edge detection with directional glyphs.
//!
//! The gradient is computed over cell luminance (0-255). Rows are split into
//! contiguous bands that are processed on scoped worker threads; each worker
//! reads the shared input and writes only its own slice of the output.

use std::f64::consts::PI;
use std::thread;

use super::charset::{EDGE_DIAGONAL_DOWN, EDGE_DIAGONAL_UP, EDGE_HORIZONTAL, EDGE_VERTICAL};
use super::error::PipelineError;
use super::grayscale::luminance;
use super::pixel::{Glyph, Pixel, PixelGrid};

/// Default number of row bands processed in parallel.
pub const DEFAULT_PARTITIONS: usize = 10;

/// Edges at or below this magnitude get no directional glyph.
pub const EDGE_GLYPH_THRESHOLD: u8 = 100;

/// Horizontal gradient kernel.
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical gradient kernel, positive on the top row (y axis pointing up).
pub const SOBEL_Y: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Edge orientation derived from the gradient angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Gradient near 0 or π: vertical edge (`|`)
    Vertical,
    /// Gradient near π/4 (`\`)
    DiagonalDown,
    /// Gradient near π/2: horizontal edge (`_`)
    Horizontal,
    /// Gradient near 3π/4 (`/`)
    DiagonalUp,
}

impl EdgeDirection {
    /// Classify an angle in `[0, π)`.
    pub fn from_angle(angle: f64) -> Self {
        if angle < PI / 8.0 || angle >= 7.0 * PI / 8.0 {
            EdgeDirection::Vertical
        } else if angle < 3.0 * PI / 8.0 {
            EdgeDirection::DiagonalDown
        } else if angle < 5.0 * PI / 8.0 {
            EdgeDirection::Horizontal
        } else {
            EdgeDirection::DiagonalUp
        }
    }

    pub fn glyph(self) -> char {
        match self {
            EdgeDirection::Vertical => EDGE_VERTICAL,
            EdgeDirection::DiagonalDown => EDGE_DIAGONAL_DOWN,
            EdgeDirection::Horizontal => EDGE_HORIZONTAL,
            EdgeDirection::DiagonalUp => EDGE_DIAGONAL_UP,
        }
    }
}

/// Sobel response at one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub gx: f64,
    pub gy: f64,
}

impl Gradient {
    /// L1 magnitude `|gx| + |gy|`, saturated to 255.
    pub fn magnitude(&self) -> u8 {
        (self.gx.abs() + self.gy.abs()).min(255.0) as u8
    }

    /// Gradient angle folded into `[0, π)`.
    pub fn angle(&self) -> f64 {
        (self.gy.atan2(self.gx) + PI).rem_euclid(PI)
    }

    pub fn direction(&self) -> EdgeDirection {
        EdgeDirection::from_angle(self.angle())
    }
}

fn gradient_from_luma(luma: &[f64], width: usize, row: usize, col: usize) -> Gradient {
    let mut gx = 0.0;
    let mut gy = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let val = luma[(row + ky - 1) * width + col + kx - 1];
            gx += SOBEL_X[ky][kx] as f64 * val;
            gy += SOBEL_Y[ky][kx] as f64 * val;
        }
    }
    Gradient { gx, gy }
}

/// Gradient of an interior cell, `None` on the outer ring.
pub fn gradient_at(grid: &PixelGrid, row: usize, col: usize) -> Option<Gradient> {
    let (width, height) = (grid.width(), grid.height());
    if row == 0 || col == 0 || row + 1 >= height || col + 1 >= width {
        return None;
    }
    let mut window = [0.0; 9];
    for (i, val) in window.iter_mut().enumerate() {
        *val = luminance(&grid[(row + i / 3 - 1, col + i % 3 - 1)]);
    }
    Some(gradient_from_luma(&window, 3, 1, 1))
}

/// Sobel operator with a fixed number of worker bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SobelOperator {
    partitions: usize,
}

impl Default for SobelOperator {
    fn default() -> Self {
        Self {
            partitions: DEFAULT_PARTITIONS,
        }
    }
}

impl SobelOperator {
    pub fn new(partitions: usize) -> Result<Self, PipelineError> {
        if partitions == 0 {
            return Err(PipelineError::ZeroPartitions);
        }
        Ok(Self { partitions })
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Compute the edge grid.
    ///
    /// Output channels are R = G = B = magnitude, A = 255. With `emit_glyph`
    /// set, cells get a direction glyph when the magnitude exceeds
    /// [`EDGE_GLYPH_THRESHOLD`] and a space otherwise; without it every cell
    /// gets [`Glyph::Block`]. The outer ring always has magnitude 0.
    pub fn apply(&self, grid: &PixelGrid, emit_glyph: bool) -> PixelGrid {
        let width = grid.width();
        let height = grid.height();
        let luma: Vec<f64> = grid.pixels().iter().map(luminance).collect();

        let bands = self.partitions.min(height);
        let rows_per_band = height.div_ceil(bands);

        let mut out = grid.same_size(Pixel::default());
        thread::scope(|scope| {
            for (band, slice) in out
                .pixels_mut()
                .chunks_mut(rows_per_band * width)
                .enumerate()
            {
                let luma = &luma;
                let first_row = band * rows_per_band;
                scope.spawn(move || {
                    log::debug!(
                        "sobel band {} rows {}..{}",
                        band,
                        first_row,
                        first_row + slice.len() / width
                    );
                    sobel_band(luma, width, height, first_row, slice, emit_glyph);
                });
            }
        });

        out
    }
}

/// Fill one band of output rows starting at `first_row`.
fn sobel_band(
    luma: &[f64],
    width: usize,
    height: usize,
    first_row: usize,
    out: &mut [Pixel],
    emit_glyph: bool,
) {
    let blank = if emit_glyph { Glyph::SPACE } else { Glyph::Block };

    for (offset, row_out) in out.chunks_mut(width).enumerate() {
        let row = first_row + offset;
        for (col, cell) in row_out.iter_mut().enumerate() {
            if row == 0 || col == 0 || row == height - 1 || col == width - 1 {
                *cell = Pixel {
                    glyph: blank,
                    ..Pixel::gray(0, 255)
                };
                continue;
            }

            let gradient = gradient_from_luma(luma, width, row, col);
            let magnitude = gradient.magnitude();
            let glyph = if emit_glyph && magnitude > EDGE_GLYPH_THRESHOLD {
                Glyph::Char(gradient.direction().glyph())
            } else {
                blank
            };

            *cell = Pixel {
                glyph,
                ..Pixel::gray(magnitude, 255)
            };
        }
    }
}

/// Sobel with the default partition count.
pub fn sobel(grid: &PixelGrid, emit_glyph: bool) -> PixelGrid {
    SobelOperator::default().apply(grid, emit_glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_fn(w: usize, h: usize, f: impl Fn(usize, usize) -> u8) -> PixelGrid {
        let rows = (0..h)
            .map(|y| (0..w).map(|x| Pixel::gray(f(x, y), 255)).collect())
            .collect();
        PixelGrid::from_rows(rows).unwrap()
    }

    /// Deterministic noise without pulling in an RNG.
    fn noise_grid(w: usize, h: usize, seed: u32) -> PixelGrid {
        let mut state = seed;
        let pixels = (0..w * h)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let [r, g, b, _] = state.to_le_bytes();
                Pixel::rgba(r, g, b, 255)
            })
            .collect();
        PixelGrid::from_pixels(w, h, pixels).unwrap()
    }

    #[test]
    fn test_flat_region_has_no_edges() {
        let grid = grid_from_fn(5, 5, |_, _| 140);
        let edges = sobel(&grid, true);
        for p in edges.pixels() {
            assert_eq!(p.r, 0);
            assert_eq!(p.glyph, Glyph::SPACE);
        }
    }

    #[test]
    fn test_vertical_edge() {
        // Columns 0-1 black, 2-4 white
        let grid = grid_from_fn(5, 5, |x, _| if x < 2 { 0 } else { 255 });

        let g = gradient_at(&grid, 2, 1).unwrap();
        assert!(g.gx.abs() > 0.0);
        assert!(g.gy.abs() < 1e-9);

        let edges = sobel(&grid, true);
        for row in 1..4 {
            assert_eq!(edges[(row, 1)].glyph, Glyph::Char('|'));
            assert_eq!(edges[(row, 2)].glyph, Glyph::Char('|'));
            assert_eq!(edges[(row, 1)].r, 255);
            assert_eq!(edges[(row, 3)].glyph, Glyph::SPACE);
        }
    }

    #[test]
    fn test_horizontal_edge() {
        let grid = grid_from_fn(5, 5, |_, y| if y < 2 { 0 } else { 255 });
        let edges = sobel(&grid, true);
        assert_eq!(edges[(1, 2)].glyph, Glyph::Char('_'));
        assert_eq!(edges[(2, 2)].glyph, Glyph::Char('_'));
    }

    #[test]
    fn test_diagonal_edges() {
        // Dark upper-left, bright lower-right: the edge rises to the right
        let rising = grid_from_fn(7, 7, |x, y| if x + y < 6 { 0 } else { 255 });
        assert_eq!(sobel(&rising, true)[(3, 3)].glyph, Glyph::Char('/'));

        // Dark upper-right, bright lower-left: the edge falls to the right
        let falling = grid_from_fn(7, 7, |x, y| if x > y { 0 } else { 255 });
        assert_eq!(sobel(&falling, true)[(3, 3)].glyph, Glyph::Char('\\'));
    }

    #[test]
    fn test_border_ring_is_zero() {
        let grid = noise_grid(6, 4, 7);
        let edges = sobel(&grid, true);
        for (row, cells) in edges.rows().enumerate() {
            for (col, p) in cells.iter().enumerate() {
                if row == 0 || col == 0 || row == 3 || col == 5 {
                    assert_eq!(p.r, 0);
                    assert_eq!(p.a, 255);
                    assert_eq!(p.glyph, Glyph::SPACE);
                }
            }
        }
    }

    #[test]
    fn test_without_glyphs_every_cell_is_block() {
        let grid = grid_from_fn(5, 5, |x, _| if x < 2 { 0 } else { 255 });
        let edges = sobel(&grid, false);
        assert!(edges.glyphs().all(|g| g == Glyph::Block));
        assert_eq!(edges[(2, 2)].r, 255);
    }

    #[test]
    fn test_weak_edges_are_suppressed() {
        // Step of 20 gives |gx| = 80, below the glyph threshold
        let grid = grid_from_fn(5, 5, |x, _| if x < 2 { 100 } else { 120 });
        let edges = sobel(&grid, true);
        assert!(edges[(2, 2)].r > 0);
        assert!(edges[(2, 2)].r <= EDGE_GLYPH_THRESHOLD);
        assert_eq!(edges[(2, 2)].glyph, Glyph::SPACE);
    }

    #[test]
    fn test_tiny_grids_are_all_border() {
        for (w, h) in [(1, 1), (2, 2), (1, 5), (5, 2)] {
            let grid = noise_grid(w, h, 3);
            let edges = sobel(&grid, true);
            assert!(edges.pixels().iter().all(|p| p.r == 0));
        }
    }

    #[test]
    fn test_zero_partitions_rejected() {
        assert_eq!(SobelOperator::new(0), Err(PipelineError::ZeroPartitions));
    }

    #[test]
    fn test_parallel_matches_serial() {
        for (w, h, seed) in [(9, 13, 1), (4, 23, 2), (17, 5, 3), (3, 3, 4)] {
            let grid = noise_grid(w, h, seed);
            for emit in [true, false] {
                let serial = SobelOperator::new(1).unwrap().apply(&grid, emit);
                for partitions in 1..=h + 2 {
                    let parallel = SobelOperator::new(partitions).unwrap().apply(&grid, emit);
                    assert_eq!(parallel, serial, "{}x{} with {} partitions", w, h, partitions);
                }
            }
        }
    }

    #[test]
    fn test_gradient_at_matches_operator() {
        let grid = noise_grid(7, 6, 99);
        let edges = SobelOperator::new(2).unwrap().apply(&grid, false);
        for row in 0..6 {
            for col in 0..7 {
                match gradient_at(&grid, row, col) {
                    Some(g) => assert_eq!(g.magnitude(), edges[(row, col)].r),
                    None => assert!(row == 0 || col == 0 || row == 5 || col == 6),
                }
            }
        }
    }
}
