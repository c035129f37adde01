//! Configuration errors raised by the transform pipeline.
//!
//! All of these are detected before any pixel is processed.

use super::pixel::GridError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// Kernel sizes must be odd and at least 1
    #[error("invalid kernel size {0}: must be odd and at least 1")]
    InvalidKernelSize(usize),

    /// The fine blur of a DoG pair must be smaller than the coarse one
    #[error("fine kernel size {fine} must be smaller than coarse kernel size {coarse}")]
    KernelOrder { fine: usize, coarse: usize },

    /// Sobel needs at least one worker band
    #[error("sobel partition count must be at least 1")]
    ZeroPartitions,

    /// A DoG/XDoG tuning constant is out of range
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}
