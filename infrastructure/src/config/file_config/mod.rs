//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backends;
mod evaluation;
mod output;
mod pool;
mod templates;

pub use backends::{FileAzureConfig, FileBackendsConfig, FileGoogleConfig};
pub use evaluation::FileEvaluationConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use pool::FilePoolConfig;
pub use templates::FileTemplatesConfig;

use serde::{Deserialize, Serialize};
use srom_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Query runner pool sizing
    pub pool: FilePoolConfig,
    /// Per-term evaluation settings
    pub evaluation: FileEvaluationConfig,
    /// Positive and negative phrase templates
    pub templates: FileTemplatesConfig,
    /// Search backend credentials
    pub backends: FileBackendsConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings are informational.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.pool.validate());
        issues.extend(self.evaluation.validate());
        issues.extend(self.templates.to_sentiment_templates().1);
        issues.extend(self.backends.validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srom_domain::{ConfigIssueCode, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[pool]
workers = 4
queue_capacity = 32

[evaluation]
timeout_secs = 20

[templates]
positive = ["%v rules", "%v rocks"]
negative = ["%v sucks"]

[backends.google]
api_key = "key"
custom_search_id = "cx"

[output]
format = "ratio"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pool.workers, Some(4));
        assert_eq!(config.evaluation.timeout_secs, Some(20));
        assert_eq!(config.templates.positive.as_ref().unwrap().len(), 2);
        assert!(config.backends.google.is_some());
        assert!(config.backends.azure.is_none());
        assert_eq!(config.output.format, Some(OutputFormat::Ratio));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.pool.workers.is_none());
        assert!(config.templates.positive.is_none());
        assert!(config.backends.is_empty());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_default_warns_about_backends() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::NoBackends);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let toml_str = r#"
[pool]
workers = 0

[templates]
negative = ["%v sucks %v"]

[backends.azure]
customer_id = ""
key = "k"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let errors: Vec<_> = config
            .validate()
            .into_iter()
            .filter(|i| i.is_error())
            .collect();
        assert_eq!(errors.len(), 3);
    }
}
