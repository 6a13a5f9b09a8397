//! Evaluation parameters: per-term join control.

use std::time::Duration;

/// Parameters for [`EvaluateTermUseCase`](crate::use_cases::evaluate_term::EvaluateTermUseCase).
#[derive(Debug, Clone, Default)]
pub struct EvaluationParams {
    /// Maximum time to spend on one term, from the first submission.
    ///
    /// Queries still waiting for queue capacity or for an outcome at the
    /// deadline count as timed out, and their backends are excluded. `None`
    /// waits indefinitely.
    pub timeout: Option<Duration>,
}

impl EvaluationParams {
    /// Creates parameters from an optional timeout in seconds.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        assert!(EvaluationParams::default().timeout.is_none());
    }

    #[test]
    fn test_from_timeout_seconds() {
        let params = EvaluationParams::from_timeout_seconds(Some(15));
        assert_eq!(params.timeout, Some(Duration::from_secs(15)));
        assert!(EvaluationParams::from_timeout_seconds(None).timeout.is_none());
    }
}
