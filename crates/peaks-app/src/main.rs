//! The peaks binary: render one or two grayscale images as a 3D
//! point-lattice height field.

mod window;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use peaks_config::{CliArgs, Config};
use peaks_render::HeightImage;
use tracing::{error, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(Config::default_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config from {}: {e}", dir.display());
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|d| d.join("logs"));
    peaks_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if config_dir.is_none() {
        warn!("No platform config directory available; using defaults");
    }

    let image_a = match load_height_image(&args.images[0]) {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to load {}: {e}", args.images[0].display());
            return ExitCode::FAILURE;
        }
    };
    let image_b = match args.images.get(1) {
        Some(path) => match load_height_image(path) {
            Ok(image) => Some(image),
            Err(e) => {
                error!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    match window::run(config, image_a, image_b) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Event loop error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Decode an image file to a single-channel height image.
///
/// Color inputs are converted to 8-bit luma; the result carries one
/// intensity byte per texel.
fn load_height_image(path: &Path) -> Result<HeightImage, image::ImageError> {
    let decoded = image::open(path)?.to_luma8();
    let (width, height) = decoded.dimensions();
    tracing::info!("Loaded {} ({width}x{height})", path.display());
    Ok(HeightImage {
        width,
        height,
        pixels: decoded.into_raw(),
    })
}
