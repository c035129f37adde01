//! Subcommand handlers for render and config actions.

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::args::{ConfigAction, RenderArgs};
use crate::ascii::{downsample, to_text, GridError, PixelGrid, Stage};
use crate::config::{default_path as get_config_path, Config, ConfigError, DEFAULT_CONFIG};
use crate::raster::{ColorMode, FontPainter, GlyphRasterWriter, RasterError};

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("raster output needs a font (--font or render.font in the config)")]
    MissingFont,

    #[error("failed to open image '{path}': {source}")]
    ImageOpen {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("image '{path}' is too small for sample size {sample_size}: {source}")]
    ImageTooSmall {
        path: PathBuf,
        sample_size: u32,
        source: GridError,
    },

    #[error("failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Raster(#[from] RasterError),

    #[error("config file already exists: {0}")]
    ConfigExists(PathBuf),
}

/// Decode, sample and run the selected stage, then write the requested outputs.
///
/// With neither `--text` nor `--output` the text rendering goes to stdout.
pub fn run_render(args: &RenderArgs, mut config: Config) -> Result<(), AppError> {
    args.apply(&mut config);
    let settings = config.validate()?;

    let font_path = match (&args.output, &settings.font) {
        (Some(_), None) => return Err(AppError::MissingFont),
        (_, font) => font.clone(),
    };

    let start = Instant::now();
    let image = image::open(&args.input)
        .map_err(|e| AppError::ImageOpen {
            path: args.input.clone(),
            source: e,
        })?
        .to_rgba8();
    log::info!("Took {:?} to open image", start.elapsed());
    log::info!("Original dimensions: {} x {}", image.width(), image.height());

    let intermediate = Instant::now();
    let mut grid =
        downsample(&image, settings.sample_size).map_err(|e| AppError::ImageTooSmall {
            path: args.input.clone(),
            sample_size: settings.sample_size,
            source: e,
        })?;
    log::info!(
        "Took {:?} to sample into {} x {} cells",
        intermediate.elapsed(),
        grid.width(),
        grid.height()
    );

    let intermediate = Instant::now();
    settings.stage.run(&mut grid, &settings.composer);
    match settings.stage {
        Stage::Glyphs => log::info!(
            "Took {:?} for glyph transforms ({} edges)",
            intermediate.elapsed(),
            settings.composer.edge_mode().name()
        ),
        stage => log::info!(
            "Took {:?} for {} stage",
            intermediate.elapsed(),
            stage.name()
        ),
    }

    if let Some(ref path) = args.text {
        write_text(&grid, path)?;
        println!("Wrote text: {}", path.display());
    }

    if let (Some(path), Some(font)) = (&args.output, font_path) {
        let intermediate = Instant::now();
        let painter = FontPainter::load(&font, settings.letter_size)?;
        let mode = if settings.monochrome {
            ColorMode::Monochrome(settings.foreground)
        } else {
            ColorMode::Color
        };
        let mut writer =
            GlyphRasterWriter::for_grid(&grid, settings.letter_size, settings.background, painter)?
                .color_mode(mode);

        // Partial output is still saved
        if let Err(e) = writer.write_grid(&grid) {
            log::warn!("{}; keeping partial output", e);
        }
        log::info!("Took {:?} to draw glyphs", intermediate.elapsed());

        let intermediate = Instant::now();
        writer
            .into_canvas()
            .save(path)
            .map_err(|e| AppError::ImageSave {
                path: path.clone(),
                source: e,
            })?;
        log::info!("Took {:?} to encode output image", intermediate.elapsed());
        println!("Created image: {}", path.display());
    }

    if args.text.is_none() && args.output.is_none() {
        print!("{}", to_text(&grid));
    }

    log::info!("Total execution time: {:?}", start.elapsed());
    Ok(())
}

fn write_text(grid: &PixelGrid, path: &Path) -> Result<(), AppError> {
    std::fs::write(path, to_text(grid)).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: &ConfigAction,
    config: &Config,
    explicit_path: Option<&Path>,
) -> Result<(), AppError> {
    let config_path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!();
            println!("{}", config.to_toml());

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            init_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

/// Write the default config template, refusing to overwrite.
pub fn init_config(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        return Err(AppError::ConfigExists(path.to_path_buf()));
    }

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
