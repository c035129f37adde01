//! Selects which pipeline grid reaches the output writers.

use super::blur::blur;
use super::compose::AsciiComposer;
use super::dog::DogExtractor;
use super::kernel::KernelSize;
use super::pixel::{Glyph, PixelGrid};

/// Output stage of the render pipeline.
///
/// Every stage except [`Stage::Glyphs`] leaves the grid without glyphs, so
/// the raster writer draws each cell as a solid block of its color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Stage {
    /// Tone and edge glyphs from the composer
    #[default]
    Glyphs,
    /// The sampled cells as they are
    Pixelate,
    /// Gaussian blur of the sampled cells
    Blur(KernelSize),
    /// Difference-of-Gaussians edge strength
    Dog(DogExtractor),
    /// Sobel gradient magnitude
    Sobel,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Glyphs => "glyphs",
            Stage::Pixelate => "pixelate",
            Stage::Blur(_) => "blur",
            Stage::Dog(_) => "dog",
            Stage::Sobel => "sobel",
        }
    }

    /// Replace `grid` with this stage's output.
    pub fn run(&self, grid: &mut PixelGrid, composer: &AsciiComposer) {
        match self {
            Stage::Glyphs => composer.compose(grid),
            Stage::Pixelate => clear_glyphs(grid),
            Stage::Blur(size) => {
                *grid = blur(grid, *size);
                clear_glyphs(grid);
            }
            Stage::Dog(extractor) => *grid = extractor.extract(grid),
            Stage::Sobel => *grid = composer.sobel().apply(grid, false),
        }
    }
}

fn clear_glyphs(grid: &mut PixelGrid) {
    for p in grid.pixels_mut() {
        p.glyph = Glyph::Block;
    }
}
