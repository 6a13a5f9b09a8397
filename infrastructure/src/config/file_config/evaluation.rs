//! Evaluation configuration from TOML (`[evaluation]` section)

use serde::{Deserialize, Serialize};
use srom_application::EvaluationParams;
use srom_domain::{ConfigIssue, ConfigIssueCode};

/// Raw evaluation configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    /// Per-term deadline in seconds; outcomes still pending are excluded
    pub timeout_secs: Option<u64>,
}

impl FileEvaluationConfig {
    pub fn to_params(&self) -> EvaluationParams {
        EvaluationParams::from_timeout_seconds(self.timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.timeout_secs == Some(0) {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "evaluation.timeout_secs cannot be 0",
            )]
        } else {
            Vec::new()
        }
    }
}
