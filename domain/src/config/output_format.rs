//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for evaluation results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Per-backend table followed by the verdict (default)
    #[default]
    Full,
    /// Only the aggregate ratio and verdict
    Ratio,
    /// JSON output
    Json,
}
