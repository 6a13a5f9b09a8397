//! Query runner pool configuration from TOML (`[pool]` section)
//!
//! ```toml
//! [pool]
//! workers = 8
//! queue_capacity = 64
//! ```

use serde::{Deserialize, Serialize};
use srom_application::PoolConfig;
use srom_domain::{ConfigIssue, ConfigIssueCode};

/// Raw pool configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePoolConfig {
    /// Number of query runners (default: available parallelism)
    pub workers: Option<usize>,
    /// Bounded job queue capacity (default: 64)
    pub queue_capacity: Option<usize>,
}

impl FilePoolConfig {
    /// Convert to the application pool config, clamping zero values to 1.
    pub fn to_pool_config(&self) -> PoolConfig {
        let mut config = PoolConfig::default();
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(capacity) = self.queue_capacity {
            config = config.with_queue_capacity(capacity);
        }
        config
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.workers == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroWorkers,
                "pool.workers must be at least 1",
            ));
        }
        if self.queue_capacity == Some(0) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroQueueCapacity,
                "pool.queue_capacity is 0, using 1",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_section() {
        let toml_str = r#"
[pool]
workers = 3
queue_capacity = 8
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let pool = config.pool.to_pool_config();
        assert_eq!(pool.workers(), 3);
        assert_eq!(pool.queue_capacity(), 8);
        assert!(config.pool.validate().is_empty());
    }

    #[test]
    fn test_defaults_when_absent() {
        let pool = FilePoolConfig::default().to_pool_config();
        assert!(pool.workers() >= 1);
        assert_eq!(pool.queue_capacity(), srom_application::DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn test_zero_values() {
        let config = FilePoolConfig {
            workers: Some(0),
            queue_capacity: Some(0),
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].is_error());
        assert!(!issues[1].is_error());
        assert_eq!(config.to_pool_config().queue_capacity(), 1);
    }
}
