//! Block-average downsampling of a decoded image into a cell grid.

use image::RgbaImage;

use super::pixel::{GridError, Pixel, PixelGrid};

/// Grid dimensions for an image sampled in `sample_size` blocks.
///
/// Partial blocks at the right and bottom edges are dropped.
pub fn grid_dimensions(img_width: u32, img_height: u32, sample_size: u32) -> (usize, usize) {
    if sample_size == 0 {
        return (0, 0);
    }
    (
        (img_width / sample_size) as usize,
        (img_height / sample_size) as usize,
    )
}

/// Downsample an RGBA image to one cell per `sample_size x sample_size` block.
///
/// Each cell's color is the integer mean of every channel over its block.
/// Cells start with no glyph assigned.
///
/// # Errors
/// [`GridError::Empty`] when the image is smaller than one block (or the
/// sample size is zero).
pub fn downsample(image: &RgbaImage, sample_size: u32) -> Result<PixelGrid, GridError> {
    let (img_width, img_height) = image.dimensions();
    let (char_width, char_height) = grid_dimensions(img_width, img_height, sample_size);
    if char_width == 0 || char_height == 0 {
        return Err(GridError::Empty);
    }

    let mut pixels = Vec::with_capacity(char_width * char_height);

    for cy in 0..char_height as u32 {
        for cx in 0..char_width as u32 {
            let start_x = cx * sample_size;
            let start_y = cy * sample_size;
            let end_x = (start_x + sample_size).min(img_width);
            let end_y = (start_y + sample_size).min(img_height);

            let mut sum = [0u32; 4];
            let mut count = 0u32;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let rgba = image.get_pixel(px, py).0;
                    for (s, c) in sum.iter_mut().zip(rgba) {
                        *s += c as u32;
                    }
                    count += 1;
                }
            }

            let [r, g, b, a] = sum.map(|s| (s / count.max(1)) as u8);
            pixels.push(Pixel::rgba(r, g, b, a));
        }
    }

    PixelGrid::from_pixels(char_width, char_height, pixels)
}
