//! Configuration file handling for asciify.
//!
//! Loads configuration from `~/.config/asciify/config.toml` or a custom path.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ascii::{
    AsciiComposer, DogExtractor, DogVariant, EdgeMode, KernelSize, PipelineError, SobelOperator,
    Stage, DEFAULT_DOG_THRESHOLD, DEFAULT_EPSILON, DEFAULT_PARTITIONS, DEFAULT_PHI, DEFAULT_TAU,
};

/// Configuration file structure for asciify.
/// Loaded from ~/.config/asciify/config.toml (or custom path via --config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sample: SampleConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub edges: EdgesConfig,
    #[serde(default)]
    pub sobel: SobelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Source pixels per grid cell along each axis
    #[serde(default = "default_cell_size")]
    pub size: u32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            size: default_cell_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output pixels per glyph cell along each axis
    #[serde(default = "default_cell_size")]
    pub letter_size: u32,
    #[serde(default)]
    pub monochrome: bool,
    /// Glyph color in monochrome mode, `#rrggbb` or `#rrggbbaa`
    #[serde(default = "default_foreground")]
    pub foreground: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Grid written to the outputs
    #[serde(default)]
    pub stage: StageSetting,
    /// Kernel size for the blur stage (odd)
    #[serde(default = "default_blur_kernel")]
    pub blur_kernel: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            letter_size: default_cell_size(),
            monochrome: false,
            foreground: default_foreground(),
            background: default_background(),
            font: None,
            stage: StageSetting::default(),
            blur_kernel: default_blur_kernel(),
        }
    }
}

/// Output stage selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageSetting {
    #[default]
    Glyphs,
    Pixelate,
    Blur,
    Dog,
    Sobel,
}

/// Edge stage selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeModeSetting {
    Off,
    #[default]
    Naive,
    Dog,
}

/// DoG response variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogVariantSetting {
    #[default]
    Dog,
    Xdog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgesConfig {
    #[serde(default)]
    pub mode: EdgeModeSetting,
    #[serde(default)]
    pub variant: DogVariantSetting,
    #[serde(default = "default_fine_kernel")]
    pub fine_kernel: usize,
    #[serde(default = "default_coarse_kernel")]
    pub coarse_kernel: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_tau")]
    pub tau: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_phi")]
    pub phi: f64,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        Self {
            mode: EdgeModeSetting::default(),
            variant: DogVariantSetting::default(),
            fine_kernel: default_fine_kernel(),
            coarse_kernel: default_coarse_kernel(),
            threshold: default_threshold(),
            tau: default_tau(),
            epsilon: default_epsilon(),
            phi: default_phi(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SobelConfig {
    /// Row bands processed in parallel
    #[serde(default = "default_partitions")]
    pub partitions: usize,
}

impl Default for SobelConfig {
    fn default() -> Self {
        Self {
            partitions: default_partitions(),
        }
    }
}

fn default_cell_size() -> u32 {
    8
}

fn default_foreground() -> String {
    "#ffffff".to_string()
}

fn default_background() -> String {
    "#000000".to_string()
}

fn default_blur_kernel() -> usize {
    5
}

fn default_fine_kernel() -> usize {
    5
}

fn default_coarse_kernel() -> usize {
    11
}

fn default_threshold() -> f64 {
    DEFAULT_DOG_THRESHOLD
}

fn default_tau() -> f64 {
    DEFAULT_TAU
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_phi() -> f64 {
    DEFAULT_PHI
}

fn default_partitions() -> usize {
    DEFAULT_PARTITIONS
}

/// Template written by `asciify config init`.
pub const DEFAULT_CONFIG: &str = r##"# asciify configuration

[sample]
# Source pixels averaged into one grid cell (per axis)
size = 8

[render]
# Output pixels per glyph cell (per axis)
letter_size = 8
# Draw every glyph in the foreground color; solid blocks keep their color
monochrome = false
foreground = "#ffffff"
background = "#000000"
# TrueType font used for raster output
# font = "/path/to/font.ttf"
# glyphs | pixelate | blur | dog | sobel
# Every stage but glyphs draws cells as solid color blocks
stage = "glyphs"
blur_kernel = 5

[edges]
# off | naive | dog
mode = "naive"
# dog | xdog (used when mode = "dog")
variant = "dog"
fine_kernel = 5
coarse_kernel = 11
threshold = 0.04
tau = 0.98
epsilon = 0.1
phi = 20.0

[sobel]
partitions = 10
"##;

/// Effective settings after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub sample_size: u32,
    pub letter_size: u32,
    pub monochrome: bool,
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    pub font: Option<PathBuf>,
    pub composer: AsciiComposer,
    pub stage: Stage,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// path is used and a missing file yields the default config.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_file(path)
            }
            None => {
                let path = default_path();
                if path.exists() {
                    Self::load_file(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check every value and build the pipeline.
    ///
    /// All configuration errors surface here, before any image is read.
    pub fn validate(&self) -> Result<RenderSettings, ConfigError> {
        if self.sample.size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sample.size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.render.letter_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "render.letter_size",
                message: "must be at least 1".to_string(),
            });
        }

        let foreground = parse_color(&self.render.foreground).map_err(|message| {
            ConfigError::InvalidValue {
                field: "render.foreground",
                message,
            }
        })?;
        let background = parse_color(&self.render.background).map_err(|message| {
            ConfigError::InvalidValue {
                field: "render.background",
                message,
            }
        })?;

        let sobel = SobelOperator::new(self.sobel.partitions)?;
        let edge_mode = match self.edges.mode {
            EdgeModeSetting::Off => EdgeMode::Off,
            EdgeModeSetting::Naive => EdgeMode::Naive,
            EdgeModeSetting::Dog => EdgeMode::Dog(self.edges.extractor()?),
        };

        let stage = match self.render.stage {
            StageSetting::Glyphs => Stage::Glyphs,
            StageSetting::Pixelate => Stage::Pixelate,
            StageSetting::Blur => Stage::Blur(KernelSize::new(self.render.blur_kernel)?),
            StageSetting::Dog => Stage::Dog(self.edges.extractor()?),
            StageSetting::Sobel => Stage::Sobel,
        };

        Ok(RenderSettings {
            sample_size: self.sample.size,
            letter_size: self.render.letter_size,
            monochrome: self.render.monochrome,
            foreground,
            background,
            font: self.render.font.clone(),
            composer: AsciiComposer::new(edge_mode, sobel),
            stage,
        })
    }

    /// Pretty TOML for `config show`.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("# failed to serialize: {}", e))
    }
}

impl EdgesConfig {
    fn extractor(&self) -> Result<DogExtractor, PipelineError> {
        let fine = KernelSize::new(self.fine_kernel)?;
        let coarse = KernelSize::new(self.coarse_kernel)?;
        let variant = match self.variant {
            DogVariantSetting::Dog => DogVariant::Binary {
                threshold: self.threshold,
            },
            DogVariantSetting::Xdog => DogVariant::Extended {
                tau: self.tau,
                epsilon: self.epsilon,
                phi: self.phi,
            },
        };
        DogExtractor::new(fine, coarse, variant)
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_color(s: &str) -> Result<Rgba<u8>, String> {
    let hex = s.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!(
            "Invalid color '{}'. Use #rrggbb or #rrggbbaa (e.g., #ffffff)",
            s
        ));
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        field: &'static str,
        message: String,
    },
    Pipeline(PipelineError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid {}: {}", field, message)
            }
            ConfigError::Pipeline(e) => write!(f, "Invalid pipeline settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PipelineError> for ConfigError {
    fn from(err: PipelineError) -> Self {
        ConfigError::Pipeline(err)
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("asciify").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/asciify/config.toml")
        })
}
