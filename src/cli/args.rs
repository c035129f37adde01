//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{DogVariantArg, EdgeModeArg, StageArg};
use crate::config::Config;

/// Parse a kernel size (odd, at least 1)
fn parse_kernel_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid kernel size", s))?;
    if size == 0 || size % 2 == 0 {
        return Err(format!("invalid kernel size {}: must be odd and at least 1", size));
    }
    Ok(size)
}

/// Parse a positive integer (cell sizes, partition counts)
fn parse_positive(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse a non-negative float
fn parse_non_negative(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("value must be a non-negative number, got {}", s));
    }
    Ok(v)
}

/// Convert images to ASCII art
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version, about = "Convert images to ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Print ASCII art to the terminal
    asciify render photo.jpg --edges off

    # Colored raster output with DoG edges
    asciify render photo.png -o out.png --font Fonts/MC.ttf --edges dog

    # Text file plus monochrome image
    asciify render photo.png --text out.txt -o out.png --font MC.ttf --monochrome

    # Pixelated image of the sampled cells
    asciify render photo.png -o pixels.png --font MC.ttf --stage pixelate")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image
    Render(RenderArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Options for `asciify render`. Any option given here overrides the
/// config file.
#[derive(ClapArgs, Debug, Clone)]
pub struct RenderArgs {
    /// Input image (PNG or JPEG)
    pub input: PathBuf,

    /// Write the glyph grid as text
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Write the rendered image (format from extension)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// TrueType font for raster output
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Source pixels per grid cell
    #[arg(long, value_parser = parse_positive)]
    pub sample_size: Option<u32>,

    /// Output pixels per glyph
    #[arg(long, value_parser = parse_positive)]
    pub letter_size: Option<u32>,

    /// Edge detection mode
    #[arg(long, short)]
    pub edges: Option<EdgeModeArg>,

    /// Pipeline stage to output; all but glyphs render solid blocks
    #[arg(long)]
    pub stage: Option<StageArg>,

    /// Blur kernel size for --stage blur (odd)
    #[arg(long, value_parser = parse_kernel_size)]
    pub blur_kernel: Option<usize>,

    /// DoG response variant
    #[arg(long)]
    pub variant: Option<DogVariantArg>,

    /// Fine blur kernel size for DoG (odd)
    #[arg(long, value_parser = parse_kernel_size)]
    pub fine_kernel: Option<usize>,

    /// Coarse blur kernel size for DoG (odd)
    #[arg(long, value_parser = parse_kernel_size)]
    pub coarse_kernel: Option<usize>,

    /// Binary DoG threshold (0.0-1.0)
    #[arg(long, value_parser = parse_non_negative)]
    pub threshold: Option<f64>,

    /// XDoG coarse blur damping
    #[arg(long, value_parser = parse_non_negative)]
    pub tau: Option<f64>,

    /// XDoG threshold
    #[arg(long, value_parser = parse_non_negative)]
    pub epsilon: Option<f64>,

    /// XDoG transition sharpness
    #[arg(long, value_parser = parse_non_negative)]
    pub phi: Option<f64>,

    /// Sobel worker bands
    #[arg(long, value_parser = parse_positive)]
    pub partitions: Option<u32>,

    /// Draw all glyphs in the foreground color
    #[arg(long)]
    pub monochrome: bool,

    /// Glyph color for --monochrome (#rrggbb)
    #[arg(long)]
    pub foreground: Option<String>,

    /// Canvas background (#rrggbb)
    #[arg(long)]
    pub background: Option<String>,
}

impl RenderArgs {
    /// Merge settings: CLI args > config file > built-in defaults
    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.sample_size {
            config.sample.size = size;
        }
        if let Some(size) = self.letter_size {
            config.render.letter_size = size;
        }
        if self.monochrome {
            config.render.monochrome = true;
        }
        if let Some(ref fg) = self.foreground {
            config.render.foreground = fg.clone();
        }
        if let Some(ref bg) = self.background {
            config.render.background = bg.clone();
        }
        if let Some(ref font) = self.font {
            config.render.font = Some(font.clone());
        }
        if let Some(stage) = self.stage {
            config.render.stage = stage.into();
        }
        if let Some(size) = self.blur_kernel {
            config.render.blur_kernel = size;
        }
        if let Some(mode) = self.edges {
            config.edges.mode = mode.into();
        }
        if let Some(variant) = self.variant {
            config.edges.variant = variant.into();
        }
        if let Some(size) = self.fine_kernel {
            config.edges.fine_kernel = size;
        }
        if let Some(size) = self.coarse_kernel {
            config.edges.coarse_kernel = size;
        }
        if let Some(v) = self.threshold {
            config.edges.threshold = v;
        }
        if let Some(v) = self.tau {
            config.edges.tau = v;
        }
        if let Some(v) = self.epsilon {
            config.edges.epsilon = v;
        }
        if let Some(v) = self.phi {
            config.edges.phi = v;
        }
        if let Some(n) = self.partitions {
            config.sobel.partitions = n as usize;
        }
    }
}
