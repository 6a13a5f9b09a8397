//! Evaluation result value objects
//!
//! - [`PerBackendResult`] - positive/negative outcomes of one backend and the derived ratio
//! - [`EvaluationResult`] - complete result for one term, handed to the output sink

use super::outcome::BackendOutcome;
use super::ratio::{AggregateRatio, BackendRatio};
use super::verdict::Verdict;
use crate::core::term::Term;
use crate::query::template::SentimentTemplates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcomes of both queries sent to one backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerBackendResult {
    /// Backend identity (e.g., "Google Custom Search")
    pub backend: String,
    pub positive: BackendOutcome,
    pub negative: BackendOutcome,
    /// Derived ratio, or why this backend was excluded
    pub ratio: BackendRatio,
}

impl PerBackendResult {
    /// Pair two outcomes and derive the backend ratio
    pub fn new(backend: impl Into<String>, positive: BackendOutcome, negative: BackendOutcome) -> Self {
        let ratio = BackendRatio::from_outcomes(&positive, &negative);
        Self {
            backend: backend.into(),
            positive,
            negative,
            ratio,
        }
    }

    pub fn is_included(&self) -> bool {
        self.ratio.is_included()
    }
}

/// Finished evaluation of one term
///
/// Immutable once built; owned by the evaluator until handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub term: Term,
    pub timestamp: DateTime<Utc>,
    /// Per-backend outcomes, in configured backend order
    pub backends: Vec<PerBackendResult>,
    /// Mean of the included backend ratios
    #[serde(with = "crate::sentiment::ratio::ratio_serde")]
    pub ratio: f64,
    /// Number of backends that contributed to `ratio`
    pub included: usize,
    /// Templates the queries were built from
    pub templates: SentimentTemplates,
}

impl EvaluationResult {
    /// Reduce per-backend results into an evaluation.
    ///
    /// Returns `None` if no backend is usable.
    pub fn from_backends(
        term: Term,
        timestamp: DateTime<Utc>,
        templates: SentimentTemplates,
        backends: Vec<PerBackendResult>,
    ) -> Option<Self> {
        let aggregate = AggregateRatio::from_ratios(backends.iter().map(|b| &b.ratio))?;
        Some(Self {
            term,
            timestamp,
            backends,
            ratio: aggregate.ratio,
            included: aggregate.included,
            templates,
        })
    }

    /// Backends left out of the aggregate
    pub fn excluded(&self) -> impl Iterator<Item = &PerBackendResult> {
        self.backends.iter().filter(|b| !b.is_included())
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_ratio(self.ratio)
    }
}
