//! Glyph-assignment pipeline for converting images to ASCII art.
//!
//! The pipeline runs over a [`PixelGrid`] of averaged image cells:
//!
//! 1. **Tone mapping** - luminance bucket to a glyph from [`GLYPH_RAMP`]
//! 2. **Edge pre-filter** - optional Difference-of-Gaussians ([`dog`], [`xdog`])
//! 3. **Sobel** - gradient magnitude and direction glyphs, computed in
//!    parallel row bands
//! 4. **Merge** - edge glyphs override tone glyphs where they fire
//!
//! [`AsciiComposer`] drives the stages; [`to_text`] serializes the result.
//! [`Stage`] can instead hand an intermediate grid to the writers as blocks.

mod blur;
mod charset;
mod compose;
mod dog;
mod downsample;
mod edges;
mod error;
mod grayscale;
mod kernel;
mod mapping;
mod pixel;
mod stage;
mod text;

pub use blur::{blur, blur_with};
pub use charset::{
    EDGE_DIAGONAL_DOWN, EDGE_DIAGONAL_UP, EDGE_HORIZONTAL, EDGE_VERTICAL, GLYPH_RAMP, RAMP_LEVELS,
};
pub use compose::{merge_edges, AsciiComposer, EdgeMode};
pub use dog::{
    dog, xdog, DogExtractor, DogVariant, DEFAULT_DOG_THRESHOLD, DEFAULT_EPSILON, DEFAULT_PHI,
    DEFAULT_TAU,
};
pub use downsample::{downsample, grid_dimensions};
pub use edges::{
    gradient_at, sobel, EdgeDirection, Gradient, SobelOperator, DEFAULT_PARTITIONS,
    EDGE_GLYPH_THRESHOLD, SOBEL_X, SOBEL_Y,
};
pub use error::PipelineError;
pub use grayscale::{luminance, normalized_luminance};
pub use kernel::{Kernel1D, Kernel2D, KernelSize};
pub use mapping::{luminance_bucket, map_luminance, tone_glyph};
pub use pixel::{Glyph, GridError, Pixel, PixelGrid};
pub use stage::Stage;
pub use text::to_text;
