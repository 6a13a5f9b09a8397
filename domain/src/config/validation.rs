//! Configuration validation issues.
//!
//! The infrastructure layer inspects the raw configuration file and reports
//! every problem it finds as a [`ConfigIssue`]. Callers decide what to do
//! with warnings; errors abort startup.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A credential field is present but blank.
    EmptyCredential { field: String },
    /// The worker count was explicitly set to zero.
    ZeroWorkers,
    /// The job queue capacity was explicitly set to zero.
    ZeroQueueCapacity,
    /// The evaluation timeout was explicitly set to zero.
    ZeroTimeout,
    /// A template list failed validation.
    InvalidTemplates { field: String },
    /// No search backend section is configured.
    NoBackends,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_severity() {
        let issue = ConfigIssue::warning(ConfigIssueCode::NoBackends, "no backends configured");
        assert_eq!(issue.to_string(), "warning: no backends configured");
        assert!(!issue.is_error());
    }

    #[test]
    fn test_error_constructor() {
        let issue = ConfigIssue::error(ConfigIssueCode::ZeroWorkers, "pool.workers must be >= 1");
        assert!(issue.is_error());
        assert_eq!(issue.code, ConfigIssueCode::ZeroWorkers);
    }
}
