//! Unit tests for the glyph pipeline through the public API.
//!
//! These tests cover:
//! - Gaussian kernel normalization and separable blur
//! - Luminance bucketing
//! - Sobel direction glyphs and banded parallelism
//! - Tone/edge merge
//! - Raster cursor wrap and overflow

use asciify::ascii::*;
use asciify::raster::{ColorMode, GlyphPainter, GlyphRasterWriter, RasterCursor, RasterError};
use image::{Rgba, RgbaImage};

/// Build a `width x height` grid from a per-cell closure of `(row, col)`.
fn grid_from(width: usize, height: usize, f: impl Fn(usize, usize) -> Pixel) -> PixelGrid {
    let rows = (0..height)
        .map(|row| (0..width).map(|col| f(row, col)).collect())
        .collect();
    PixelGrid::from_rows(rows).unwrap()
}

/// Deterministic pseudo-random noise so banding bugs show up.
fn noise_grid(width: usize, height: usize) -> PixelGrid {
    grid_from(width, height, |row, col| {
        let v = ((row * 131 + col * 71 + row * col * 17) % 256) as u8;
        Pixel::rgba(v, v.wrapping_mul(3), v.wrapping_add(40), 255)
    })
}

fn glyph_string(grid: &PixelGrid) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().map(|p| p.glyph.as_char()).collect())
        .collect()
}

// ==================== Kernel Tests ====================

#[test]
fn test_kernel_weights_sum_to_one() {
    for size in (1..=99).step_by(2) {
        let kernel = Kernel1D::gaussian(KernelSize::new(size).unwrap());
        let sum: f64 = kernel.weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "size {} sums to {}", size, sum);
        assert_eq!(kernel.len(), size);
    }
}

#[test]
fn test_kernel_size_validation() {
    assert_eq!(KernelSize::new(0), Err(PipelineError::InvalidKernelSize(0)));
    assert_eq!(KernelSize::new(4), Err(PipelineError::InvalidKernelSize(4)));
    assert!(KernelSize::new(1).is_ok());
    assert!(KernelSize::try_from(7usize).is_ok());
}

#[test]
fn test_invalid_kernel_message_names_size() {
    let err = KernelSize::new(6).unwrap_err();
    assert!(err.to_string().contains("invalid kernel size 6"));
}

// ==================== Blur Tests ====================

#[test]
fn test_blur_constant_field_is_identity() {
    let color = Pixel::rgba(37, 120, 201, 180);
    let grid = PixelGrid::filled(9, 7, color).unwrap();

    for size in [1, 3, 5, 11, 21] {
        let out = blur(&grid, KernelSize::new(size).unwrap());
        assert_eq!(out.width(), 9);
        assert_eq!(out.height(), 7);
        for p in out.pixels() {
            assert_eq!(p.channels(), color.channels(), "kernel size {}", size);
        }
    }
}

#[test]
fn test_blur_smooths_step() {
    let grid = grid_from(10, 3, |_, col| {
        if col < 5 {
            Pixel::gray(0, 255)
        } else {
            Pixel::gray(255, 255)
        }
    });
    let out = blur(&grid, KernelSize::new(5).unwrap());

    let left = out.get(4, 1).unwrap().r;
    let right = out.get(5, 1).unwrap().r;
    assert!(left > 0 && left < 128, "left of step is {}", left);
    assert!(right > 128 && right < 255, "right of step is {}", right);
    // Far from the step the clamped border keeps the original value
    assert_eq!(out.get(0, 1).unwrap().r, 0);
    assert_eq!(out.get(9, 1).unwrap().r, 255);
}

// ==================== Luminance Tests ====================

#[test]
fn test_luminance_known_buckets() {
    assert_eq!(tone_glyph(&Pixel::gray(0, 255)), ' ');
    assert_eq!(luminance_bucket(&Pixel::gray(128, 255)), 5);
    assert_eq!(tone_glyph(&Pixel::gray(128, 255)), 'C');
    assert_eq!(luminance_bucket(&Pixel::gray(255, 255)), 9);
    assert_eq!(tone_glyph(&Pixel::gray(255, 255)), '■');
}

#[test]
fn test_luminance_monotonic_over_grays() {
    let buckets: Vec<usize> = (0..=255u8)
        .map(|v| luminance_bucket(&Pixel::gray(v, 255)))
        .collect();
    assert!(buckets.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(buckets[0], 0);
    assert_eq!(buckets[255], RAMP_LEVELS - 1);
}

#[test]
fn test_green_is_brighter_than_blue() {
    let green = Pixel::rgba(0, 255, 0, 255);
    let blue = Pixel::rgba(0, 0, 255, 255);
    assert!(luminance(&green) > luminance(&blue));
    assert!(luminance_bucket(&green) >= luminance_bucket(&blue));
}

#[test]
fn test_map_luminance_keeps_colors() {
    let mut grid = noise_grid(6, 4);
    let before: Vec<[u8; 4]> = grid.pixels().iter().map(Pixel::channels).collect();
    map_luminance(&mut grid);
    let after: Vec<[u8; 4]> = grid.pixels().iter().map(Pixel::channels).collect();
    assert_eq!(before, after);
    assert!(grid.glyphs().all(|g| matches!(g, Glyph::Char(_))));
}

// ==================== Sobel Tests ====================

#[test]
fn test_sobel_flat_region() {
    let grid = PixelGrid::filled(5, 5, Pixel::gray(90, 255)).unwrap();
    let out = sobel(&grid, true);
    for p in out.pixels() {
        assert_eq!(p.r, 0);
        assert!(p.glyph.is_blank());
    }
}

#[test]
fn test_sobel_vertical_edge() {
    let grid = grid_from(5, 5, |_, col| {
        if col < 2 {
            Pixel::gray(0, 255)
        } else {
            Pixel::gray(255, 255)
        }
    });

    for row in 1..4 {
        for col in [1, 2] {
            let gradient = gradient_at(&grid, row, col).unwrap();
            assert!(gradient.gx.abs() > 0.0);
            assert!(gradient.gy.abs() < 1e-9);
        }
    }

    let out = sobel(&grid, true);
    for row in 1..4 {
        assert_eq!(out[(row, 1)].glyph, Glyph::Char(EDGE_VERTICAL));
        assert_eq!(out[(row, 2)].glyph, Glyph::Char(EDGE_VERTICAL));
        assert_eq!(out[(row, 1)].r, 255);
    }
}

#[test]
fn test_sobel_border_is_blank() {
    let out = sobel(&noise_grid(8, 6), true);
    for (row, cells) in out.rows().enumerate() {
        for (col, p) in cells.iter().enumerate() {
            if row == 0 || col == 0 || row == 5 || col == 7 {
                assert_eq!(p.r, 0);
                assert!(p.glyph.is_blank());
            }
            assert_eq!(p.a, 255);
        }
    }
}

#[test]
fn test_sobel_without_glyphs_uses_block() {
    let out = sobel(&noise_grid(8, 8), false);
    assert!(out.glyphs().all(|g| g == Glyph::Block));
}

#[test]
fn test_parallel_matches_serial() {
    for (width, height) in [(7, 13), (16, 10), (3, 3), (12, 1), (1, 9)] {
        let grid = noise_grid(width, height);
        let serial = SobelOperator::new(1).unwrap().apply(&grid, true);
        for partitions in 1..=height + 3 {
            let parallel = SobelOperator::new(partitions).unwrap().apply(&grid, true);
            assert_eq!(
                parallel, serial,
                "{}x{} with {} partitions",
                width, height, partitions
            );
        }
    }
}

#[test]
fn test_zero_partitions_rejected() {
    assert_eq!(SobelOperator::new(0), Err(PipelineError::ZeroPartitions));
}

// ==================== DoG Tests ====================

#[test]
fn test_dog_requires_fine_below_coarse() {
    let grid = noise_grid(8, 8);
    let k5 = KernelSize::new(5).unwrap();
    let k3 = KernelSize::new(3).unwrap();
    assert_eq!(
        dog(&grid, k5, k3, DEFAULT_DOG_THRESHOLD).unwrap_err(),
        PipelineError::KernelOrder { fine: 5, coarse: 3 }
    );
    assert!(dog(&grid, k5, k5, DEFAULT_DOG_THRESHOLD).is_err());
}

#[test]
fn test_dog_is_binary_and_glyphless() {
    let grid = noise_grid(12, 12);
    let out = dog(
        &grid,
        KernelSize::new(3).unwrap(),
        KernelSize::new(7).unwrap(),
        DEFAULT_DOG_THRESHOLD,
    )
    .unwrap();
    for p in out.pixels() {
        assert!(p.r == 0 || p.r == 255);
        assert_eq!((p.r, p.r), (p.g, p.b));
        assert_eq!(p.glyph, Glyph::Block);
    }
}

#[test]
fn test_xdog_flat_region() {
    let grid = PixelGrid::filled(6, 6, Pixel::gray(200, 255)).unwrap();
    let fine = KernelSize::new(3).unwrap();
    let coarse = KernelSize::new(5).unwrap();

    // l1 - 0.5 * l2 is far above epsilon
    let damped = xdog(&grid, fine, coarse, 0.5, DEFAULT_EPSILON, DEFAULT_PHI).unwrap();
    assert!(damped.pixels().iter().all(|p| p.r == 255));

    // With tau near 1 the difference stays under epsilon and the sigmoid
    // keeps the response low
    let soft = xdog(&grid, fine, coarse, DEFAULT_TAU, DEFAULT_EPSILON, DEFAULT_PHI).unwrap();
    assert!(soft.pixels().iter().all(|p| p.r < 128));
}

// ==================== Compose Tests ====================

#[test]
fn test_merge_single_override() {
    let mut tone = grid_from(4, 3, |_, _| Pixel {
        glyph: Glyph::Char('C'),
        ..Pixel::gray(128, 255)
    });
    let original = tone.clone();
    let edges = grid_from(4, 3, |row, col| {
        let glyph = if (row, col) == (1, 2) {
            Glyph::Char('|')
        } else if col == 0 {
            Glyph::SPACE
        } else {
            Glyph::Block
        };
        Pixel {
            glyph,
            ..Pixel::gray(0, 255)
        }
    });

    merge_edges(&mut tone, &edges).unwrap();

    for row in 0..3 {
        for col in 0..4 {
            if (row, col) == (1, 2) {
                assert_eq!(tone[(row, col)].glyph, Glyph::Char('|'));
            } else {
                assert_eq!(tone[(row, col)], original[(row, col)]);
            }
        }
    }
}

#[test]
fn test_merge_size_mismatch() {
    let mut tone = PixelGrid::new(4, 4).unwrap();
    let edges = PixelGrid::new(4, 3).unwrap();
    assert!(matches!(
        merge_edges(&mut tone, &edges),
        Err(GridError::SizeMismatch { .. })
    ));
}

#[test]
fn test_compose_off_is_tone_only() {
    let mut composed = noise_grid(8, 8);
    let mut toned = composed.clone();
    AsciiComposer::new(EdgeMode::Off, SobelOperator::default()).compose(&mut composed);
    map_luminance(&mut toned);
    assert_eq!(composed, toned);
}

#[test]
fn test_compose_naive_draws_edge() {
    let mut grid = grid_from(6, 5, |_, col| {
        if col < 3 {
            Pixel::gray(0, 255)
        } else {
            Pixel::gray(255, 255)
        }
    });
    AsciiComposer::default().compose(&mut grid);

    let rows = glyph_string(&grid);
    assert_eq!(rows[2], "  ||■■");
    // Border rows keep tone glyphs
    assert_eq!(rows[0], "   ■■■");
}

// ==================== Raster Tests ====================

#[derive(Default)]
struct RecordingPainter {
    calls: Vec<(u32, u32, char, Rgba<u8>)>,
}

impl GlyphPainter for RecordingPainter {
    fn draw_glyph(
        &mut self,
        _canvas: &mut RgbaImage,
        x: u32,
        y: u32,
        _size: u32,
        ch: char,
        color: Rgba<u8>,
    ) {
        self.calls.push((x, y, ch, color));
    }
}

#[test]
fn test_cursor_wraps_rows() {
    let mut cursor = RasterCursor::new(30, 20, 10);
    let positions: Vec<(u32, u32)> = (0..6).map(|_| cursor.next_cell().unwrap()).collect();
    assert_eq!(
        positions,
        vec![(0, 0), (10, 0), (20, 0), (0, 10), (10, 10), (20, 10)]
    );
    assert_eq!(cursor.next_cell(), Err(RasterError::Overflow { y: 20 }));
}

#[test]
fn test_writer_overflow_keeps_partial_output() {
    let canvas = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
    let mut writer = GlyphRasterWriter::with_canvas(canvas, 10, RecordingPainter::default())
        .unwrap()
        .color_mode(ColorMode::Monochrome(Rgba([255, 255, 255, 255])));
    let grid = grid_from(3, 1, |_, col| match col {
        0 => Pixel::rgba(200, 10, 10, 255),
        _ => Pixel {
            glyph: Glyph::Char('o'),
            ..Pixel::rgba(10, 200, 10, 255)
        },
    });

    assert_eq!(
        writer.write_grid(&grid),
        Err(RasterError::Overflow { y: 10 })
    );

    // Block fill keeps the true cell color even in monochrome mode
    let canvas = writer.canvas();
    assert_eq!(*canvas.get_pixel(0, 0), Rgba([200, 10, 10, 255]));
    assert_eq!(*canvas.get_pixel(9, 9), Rgba([200, 10, 10, 255]));
    // Glyph cell left to the painter
    assert_eq!(*canvas.get_pixel(15, 5), Rgba([0, 0, 0, 255]));
}
