//! Sentiment outcomes, ratios and results
//!
//! ```text
//!   BackendOutcome (positive) ─┐
//!                              ├─> PerBackendResult ─┐
//!   BackendOutcome (negative) ─┘   (BackendRatio)    ├─> EvaluationResult
//!                                  ...               │   (AggregateRatio)
//!                              PerBackendResult ─────┘
//! ```

pub mod outcome;
pub mod ratio;
pub mod result;
pub mod verdict;

pub use outcome::{BackendOutcome, FailureReason};
pub use ratio::{AggregateRatio, BackendRatio, ExclusionReason};
pub use result::{EvaluationResult, PerBackendResult};
pub use verdict::{Sentiment, Verdict};
