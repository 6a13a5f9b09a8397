//! Configuration file loading for srom
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables: `SROM_*`
//! 2. `--config <path>` specified file
//! 3. Project root: `./srom.toml` or `./.srom.toml`
//! 4. Global: `$XDG_CONFIG_HOME/srom/config.toml`
//! 5. Default values

mod file_config;
mod loader;

use std::path::PathBuf;
use thiserror::Error;

pub use file_config::{
    FileAzureConfig, FileBackendsConfig, FileConfig, FileEvaluationConfig, FileGoogleConfig,
    FileOutputConfig, FileOutputFormat, FilePoolConfig, FileTemplatesConfig,
};
pub use loader::ConfigLoader;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(Box<figment::Error>),
}
