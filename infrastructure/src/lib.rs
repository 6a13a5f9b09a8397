//! Infrastructure layer for srom
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: search backends, output sinks, and
//! configuration file loading.

#[cfg(feature = "web-backends")]
pub mod backends;
pub mod config;
pub mod output;

// Re-export commonly used types
#[cfg(feature = "web-backends")]
pub use backends::{AzureSearch, GoogleSearch, build_backends};
pub use config::{
    ConfigError, ConfigLoader, FileAzureConfig, FileBackendsConfig, FileConfig,
    FileEvaluationConfig, FileGoogleConfig, FileOutputConfig, FileOutputFormat, FilePoolConfig,
    FileTemplatesConfig,
};
pub use output::{JsonlOutput, TracingOutput};
