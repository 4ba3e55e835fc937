//! Configuration system for the peaks renderer.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! plus the command-line surface: one or two positional image paths and a
//! small set of overrides applied on top of the loaded config.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, InputConfig, RenderConfig, WindowConfig};
pub use error::ConfigError;
