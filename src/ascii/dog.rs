//! Difference-of-Gaussians edge extraction.
//!
//! Both variants blur the input at a fine and a coarse size and compare the
//! normalized luminance of the two results cell by cell. The output is a
//! grayscale grid (R = G = B = edge strength) with no glyphs assigned.

use super::blur::blur;
use super::error::PipelineError;
use super::grayscale::normalized_luminance;
use super::kernel::KernelSize;
use super::pixel::{Pixel, PixelGrid};

/// Default binary DoG threshold on normalized luminance.
pub const DEFAULT_DOG_THRESHOLD: f64 = 0.04;

/// Default XDoG coarse-blur damping.
pub const DEFAULT_TAU: f64 = 0.98;

/// Default XDoG threshold.
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Default XDoG transition sharpness.
pub const DEFAULT_PHI: f64 = 20.0;

/// How the luminance difference becomes an edge strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DogVariant {
    /// Hard binary mask: 255 where `|l1 - l2| >= threshold`, else 0
    Binary { threshold: f64 },
    /// Soft sigmoid response of `l1 - tau * l2`
    Extended { tau: f64, epsilon: f64, phi: f64 },
}

impl Default for DogVariant {
    fn default() -> Self {
        DogVariant::Binary {
            threshold: DEFAULT_DOG_THRESHOLD,
        }
    }
}

impl DogVariant {
    pub fn extended_default() -> Self {
        DogVariant::Extended {
            tau: DEFAULT_TAU,
            epsilon: DEFAULT_EPSILON,
            phi: DEFAULT_PHI,
        }
    }

    /// Edge strength (0-255) for a pair of normalized luminances.
    pub fn strength(&self, l1: f64, l2: f64) -> u8 {
        match *self {
            DogVariant::Binary { threshold } => {
                if (l1 - l2).abs() >= threshold {
                    255
                } else {
                    0
                }
            }
            DogVariant::Extended { tau, epsilon, phi } => {
                let d = (l1 - tau * l2).max(0.0);
                if d >= epsilon {
                    255
                } else {
                    let soft = 255.0 * 0.5 * (1.0 + (phi * (d - epsilon)).tanh());
                    soft.round().clamp(0.0, 255.0) as u8
                }
            }
        }
    }

    fn validate(&self) -> Result<(), PipelineError> {
        let check = |name: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(PipelineError::InvalidParameter { name, value })
            }
        };
        match *self {
            DogVariant::Binary { threshold } => check("threshold", threshold),
            DogVariant::Extended { tau, epsilon, phi } => {
                check("tau", tau)?;
                check("epsilon", epsilon)?;
                check("phi", phi)
            }
        }
    }
}

/// A validated DoG configuration: two blur sizes and a response variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DogExtractor {
    fine: KernelSize,
    coarse: KernelSize,
    variant: DogVariant,
}

impl DogExtractor {
    pub fn new(
        fine: KernelSize,
        coarse: KernelSize,
        variant: DogVariant,
    ) -> Result<Self, PipelineError> {
        if fine.get() >= coarse.get() {
            return Err(PipelineError::KernelOrder {
                fine: fine.get(),
                coarse: coarse.get(),
            });
        }
        variant.validate()?;
        Ok(Self {
            fine,
            coarse,
            variant,
        })
    }

    pub fn variant(&self) -> DogVariant {
        self.variant
    }

    /// Produce the edge-strength grid.
    pub fn extract(&self, grid: &PixelGrid) -> PixelGrid {
        let fine = blur(grid, self.fine);
        let coarse = blur(grid, self.coarse);

        let mut out = grid.same_size(Pixel::default());
        for ((dst, p1), p2) in out
            .pixels_mut()
            .iter_mut()
            .zip(fine.pixels())
            .zip(coarse.pixels())
        {
            let value = self
                .variant
                .strength(normalized_luminance(p1), normalized_luminance(p2));
            let alpha = ((p1.a as u16 + p2.a as u16) / 2) as u8;
            *dst = Pixel::gray(value, alpha);
        }
        out
    }
}

/// Binary Difference-of-Gaussians.
pub fn dog(
    grid: &PixelGrid,
    fine: KernelSize,
    coarse: KernelSize,
    threshold: f64,
) -> Result<PixelGrid, PipelineError> {
    let extractor = DogExtractor::new(fine, coarse, DogVariant::Binary { threshold })?;
    Ok(extractor.extract(grid))
}

/// Extended (soft-threshold) Difference-of-Gaussians.
pub fn xdog(
    grid: &PixelGrid,
    fine: KernelSize,
    coarse: KernelSize,
    tau: f64,
    epsilon: f64,
    phi: f64,
) -> Result<PixelGrid, PipelineError> {
    let extractor = DogExtractor::new(fine, coarse, DogVariant::Extended { tau, epsilon, phi })?;
    Ok(extractor.extract(grid))
}
