//! Tone + edge composition.

use std::time::Instant;

use super::dog::DogExtractor;
use super::edges::SobelOperator;
use super::mapping::map_luminance;
use super::pixel::{GridError, PixelGrid};

/// Which edge stage, if any, runs after the tone stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EdgeMode {
    /// Tone glyphs only
    Off,
    /// Sobel directly on the source grid
    #[default]
    Naive,
    /// Sobel on a Difference-of-Gaussians edge-strength grid
    Dog(DogExtractor),
}

impl EdgeMode {
    pub fn name(&self) -> &'static str {
        match self {
            EdgeMode::Off => "off",
            EdgeMode::Naive => "naive",
            EdgeMode::Dog(_) => "dog",
        }
    }
}

/// Copy every non-blank edge glyph over the tone glyph at the same cell.
///
/// Blank edge cells (space or block) keep the tone glyph. Colors of `tone`
/// are not touched.
pub fn merge_edges(tone: &mut PixelGrid, edges: &PixelGrid) -> Result<(), GridError> {
    if tone.width() != edges.width() || tone.height() != edges.height() {
        return Err(GridError::SizeMismatch {
            width: tone.width(),
            height: tone.height(),
            found_width: edges.width(),
            found_height: edges.height(),
        });
    }

    overlay_edges(tone, edges);
    Ok(())
}

/// Merge without the size check, for grids of the same dimensions.
fn overlay_edges(tone: &mut PixelGrid, edges: &PixelGrid) {
    for (cell, edge) in tone.pixels_mut().iter_mut().zip(edges.pixels()) {
        if !edge.glyph.is_blank() {
            cell.glyph = edge.glyph;
        }
    }
}

/// Drives the tone, DoG and Sobel stages and merges their glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AsciiComposer {
    edge_mode: EdgeMode,
    sobel: SobelOperator,
}

impl AsciiComposer {
    pub fn new(edge_mode: EdgeMode, sobel: SobelOperator) -> Self {
        Self { edge_mode, sobel }
    }

    pub fn edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    pub fn sobel(&self) -> SobelOperator {
        self.sobel
    }

    /// Assign final glyphs to `grid` in place. Colors are preserved.
    pub fn compose(&self, grid: &mut PixelGrid) {
        let start = Instant::now();
        map_luminance(grid);
        log::info!("Took {:?} to map luminance", start.elapsed());

        let edges = match self.edge_mode {
            EdgeMode::Off => return,
            EdgeMode::Naive => {
                let start = Instant::now();
                let edges = self.sobel.apply(grid, true);
                log::info!(
                    "Took {:?} to run sobel over {} bands",
                    start.elapsed(),
                    self.sobel.partitions().min(grid.height())
                );
                edges
            }
            EdgeMode::Dog(extractor) => {
                let start = Instant::now();
                let strength = extractor.extract(grid);
                log::info!("Took {:?} to extract DoG edges", start.elapsed());

                let start = Instant::now();
                let edges = self.sobel.apply(&strength, true);
                log::info!("Took {:?} to run sobel on DoG edges", start.elapsed());
                edges
            }
        };

        // Sobel output always matches the input dimensions
        overlay_edges(grid, &edges);
    }
}
