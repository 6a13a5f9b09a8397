//! Progress notification port
//!
//! Defines the interface for reporting progress while a term is evaluated.

use srom_domain::{Polarity, Term};

/// Callback for progress updates during evaluation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called after all queries for a term have been submitted
    fn on_evaluation_start(&self, term: &Term, total_queries: usize);

    /// Called when one query outcome arrives
    fn on_query_complete(&self, term: &Term, backend: &str, polarity: Polarity, success: bool);

    /// Called when all outcomes for a term are in
    fn on_evaluation_complete(&self, term: &Term, included: usize, total: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_evaluation_start(&self, _term: &Term, _total_queries: usize) {}
    fn on_query_complete(&self, _term: &Term, _backend: &str, _polarity: Polarity, _success: bool) {}
    fn on_evaluation_complete(&self, _term: &Term, _included: usize, _total: usize) {}
}
