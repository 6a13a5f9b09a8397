//! Backend outcome for a single dispatched query

use serde::{Deserialize, Serialize};

/// Why a query produced no hit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The backend returned an error (network, status, parse)
    Query(String),
    /// The backend panicked while executing the query
    Panicked,
    /// The query was still queued when the runner pool stopped
    Abandoned,
    /// The evaluation deadline passed before the outcome arrived
    TimedOut,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Query(message) => write!(f, "query failed: {}", message),
            FailureReason::Panicked => write!(f, "backend panicked"),
            FailureReason::Abandoned => write!(f, "abandoned at shutdown"),
            FailureReason::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Result of executing one work item: a hit count or a failure marker
///
/// # Example
///
/// ```
/// use srom_domain::BackendOutcome;
///
/// assert_eq!(BackendOutcome::Hits(42).hits(), Some(42));
/// assert!(BackendOutcome::failed("HTTP 503").is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendOutcome {
    Hits(u64),
    Failed(FailureReason),
}

impl BackendOutcome {
    /// Failure caused by a backend error message
    pub fn failed(message: impl Into<String>) -> Self {
        BackendOutcome::Failed(FailureReason::Query(message.into()))
    }

    pub fn hits(&self) -> Option<u64> {
        match self {
            BackendOutcome::Hits(count) => Some(*count),
            BackendOutcome::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, BackendOutcome::Failed(_))
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, BackendOutcome::Failed(FailureReason::Abandoned))
    }
}

impl std::fmt::Display for BackendOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendOutcome::Hits(count) => write!(f, "{}", count),
            BackendOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}
