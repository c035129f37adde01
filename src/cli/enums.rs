//! CLI enum types for edge mode and DoG variant options.

use clap::ValueEnum;

use crate::config::{DogVariantSetting, EdgeModeSetting, StageSetting};

/// Edge detection stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EdgeModeArg {
    /// Tone glyphs only
    Off,
    /// Sobel on the sampled image
    #[default]
    Naive,
    /// Sobel on a Difference-of-Gaussians edge mask
    Dog,
}

impl From<EdgeModeArg> for EdgeModeSetting {
    fn from(m: EdgeModeArg) -> Self {
        match m {
            EdgeModeArg::Off => EdgeModeSetting::Off,
            EdgeModeArg::Naive => EdgeModeSetting::Naive,
            EdgeModeArg::Dog => EdgeModeSetting::Dog,
        }
    }
}

/// Difference-of-Gaussians response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DogVariantArg {
    /// Binary threshold mask
    #[default]
    Dog,
    /// Soft sigmoid (extended DoG)
    Xdog,
}

impl From<DogVariantArg> for DogVariantSetting {
    fn from(v: DogVariantArg) -> Self {
        match v {
            DogVariantArg::Dog => DogVariantSetting::Dog,
            DogVariantArg::Xdog => DogVariantSetting::Xdog,
        }
    }
}

/// Grid handed to the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StageArg {
    /// Tone and edge glyphs
    #[default]
    Glyphs,
    /// Sampled cells as solid blocks
    Pixelate,
    /// Blurred cells as solid blocks
    Blur,
    /// DoG edge strength as solid blocks
    Dog,
    /// Sobel magnitude as solid blocks
    Sobel,
}

impl From<StageArg> for StageSetting {
    fn from(s: StageArg) -> Self {
        match s {
            StageArg::Glyphs => StageSetting::Glyphs,
            StageArg::Pixelate => StageSetting::Pixelate,
            StageArg::Blur => StageSetting::Blur,
            StageArg::Dog => StageSetting::Dog,
            StageArg::Sobel => StageSetting::Sobel,
        }
    }
}
