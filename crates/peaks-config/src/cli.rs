//! Command-line argument parsing for the peaks renderer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// peaks command-line arguments.
///
/// Takes one or two grayscale image paths; with two, the rendered height
/// field cross-blends between them over time. CLI values override settings
/// loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "peaks", about = "Render grayscale images as a 3D point-lattice height field")]
pub struct CliArgs {
    /// One or two image paths. The second image enables the animated blend.
    #[arg(value_name = "IMAGE", num_args = 1..=2, required = true)]
    pub images: Vec<PathBuf>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Points along one edge of the lattice.
    #[arg(long)]
    pub lattice_size: Option<u32>,

    /// Elevation multiplier for sampled image intensity.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(n) = args.lattice_size {
            self.render.lattice_size = n;
        }
        if let Some(s) = args.height_scale {
            self.render.height_scale = s;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
