//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use srom_domain::OutputFormat;
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use srom_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Append every result as one JSON line to this file
    pub jsonl_path: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            jsonl_path: None,
        }
    }
}
