//! Output formatter trait

use srom_domain::EvaluationResult;

/// Trait for formatting evaluation results
pub trait OutputFormatter {
    /// Format the complete result with the per-backend breakdown
    fn format(&self, result: &EvaluationResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &EvaluationResult) -> String;

    /// Format the aggregate ratio only (concise output)
    fn format_ratio(&self, result: &EvaluationResult) -> String;
}
