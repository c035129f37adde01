//! Gaussian convolution kernels.

use std::f64::consts::PI;

use super::error::PipelineError;

/// A validated kernel size: odd and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelSize(usize);

impl KernelSize {
    pub fn new(size: usize) -> Result<Self, PipelineError> {
        if size == 0 || size % 2 == 0 {
            return Err(PipelineError::InvalidKernelSize(size));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Half width, `size / 2`.
    pub fn radius(self) -> usize {
        self.0 / 2
    }

    /// Gaussian sigma used for this size (`size / 6`).
    pub fn sigma(self) -> f64 {
        self.0 as f64 / 6.0
    }
}

impl TryFrom<usize> for KernelSize {
    type Error = PipelineError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

fn gaussian_1d(x: f64, sigma: f64) -> f64 {
    (-(x * x) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * PI).sqrt())
}

fn gaussian_2d(x: f64, y: f64, sigma: f64) -> f64 {
    (-(x * x + y * y) / (2.0 * sigma * sigma)).exp() / (2.0 * PI * sigma * sigma)
}

/// Normalized, symmetric 1-D Gaussian kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    weights: Vec<f64>,
}

impl Kernel1D {
    /// Sample the Gaussian at integer offsets `-radius..=radius` and
    /// renormalize so the weights sum to 1.
    pub fn gaussian(size: KernelSize) -> Self {
        let sigma = size.sigma();
        let radius = size.radius() as isize;

        let mut weights: Vec<f64> = (-radius..=radius)
            .map(|k| gaussian_1d(k as f64, sigma))
            .collect();
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }
}

/// Normalized 2-D Gaussian kernel, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel2D {
    pub fn gaussian(size: KernelSize) -> Self {
        let sigma = size.sigma();
        let radius = size.radius() as isize;

        let mut weights = Vec::with_capacity(size.get() * size.get());
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                weights.push(gaussian_2d(dx as f64, dy as f64, sigma));
            }
        }
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self {
            size: size.get(),
            weights,
        }
    }

    /// Weight at row `dy`, column `dx`, both in `0..size`.
    pub fn weight(&self, dy: usize, dx: usize) -> f64 {
        self.weights[dy * self.size + dx]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}
