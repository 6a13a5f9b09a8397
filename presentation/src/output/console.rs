//! Console output formatter for evaluation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use srom_domain::{
    BackendOutcome, BackendRatio, EvaluationResult, OutputFormat, PerBackendResult, Sentiment,
};

/// Formats evaluation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything this crate prints
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format a result in the requested format
    pub fn render(result: &EvaluationResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Ratio => Self::format_ratio(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result
    pub fn format(result: &EvaluationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Sucks-Rules-O-Meter: {}", result.term)));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Positive:".cyan().bold(),
            result.templates.positive.templates().join(", ")
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Negative:".cyan().bold(),
            result.templates.negative.templates().join(", ")
        ));

        output.push_str(&Self::section_header("Backends"));
        for backend in &result.backends {
            output.push_str(&Self::backend_line(backend));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} {} ({} of {} backends)\n",
            "Ratio:".cyan().bold(),
            Self::ratio_value(result.ratio).bold(),
            result.included,
            result.backends.len()
        ));
        output.push_str(&format!("\n{}\n", Self::verdict_sentence(result)));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &EvaluationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the ratio only, one `term<TAB>ratio` line
    pub fn format_ratio(result: &EvaluationResult) -> String {
        format!("{}\t{}", result.term, Self::ratio_value(result.ratio))
    }

    /// "The internet thinks 'rust' ROCKS HARD."
    pub fn verdict_sentence(result: &EvaluationResult) -> String {
        let verdict = result.verdict();
        let text = verdict.to_string();
        let text = match verdict.sentiment {
            Sentiment::Rocks => text.green().bold(),
            Sentiment::Sucks => text.red().bold(),
            Sentiment::Neutral => text.yellow(),
        };
        format!("The internet thinks '{}' {}.", result.term, text)
    }

    /// Format a failed evaluation for display
    pub fn format_error(term: &str, error: &dyn std::fmt::Display) -> String {
        format!("{} {}: {}", "x".red(), term.bold(), error)
    }

    fn backend_line(backend: &PerBackendResult) -> String {
        let ratio = match &backend.ratio {
            BackendRatio::Included(ratio) => Self::ratio_value(*ratio).green().to_string(),
            BackendRatio::Excluded(reason) => format!("excluded: {}", reason).red().to_string(),
        };
        format!(
            "  {:<24} {:>12} {:>12}  {}",
            backend.backend.yellow(),
            Self::outcome_value(&backend.positive),
            Self::outcome_value(&backend.negative),
            ratio
        )
    }

    fn outcome_value(outcome: &BackendOutcome) -> String {
        match outcome {
            BackendOutcome::Hits(count) => count.to_string(),
            BackendOutcome::Failed(_) => "failed".to_string(),
        }
    }

    fn ratio_value(ratio: f64) -> String {
        if ratio.is_infinite() {
            "inf".to_string()
        } else {
            format!("{:.3}", ratio)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!(
            "\n{}\n{}\n{}\n",
            title.cyan().bold(),
            "-".repeat(40),
            format!("  {:<24} {:>12} {:>12}  {}", "", "positive", "negative", "ratio").dimmed()
        )
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &EvaluationResult) -> String {
        ConsoleFormatter::format(result)
    }

    fn format_json(&self, result: &EvaluationResult) -> String {
        ConsoleFormatter::format_json(result)
    }

    fn format_ratio(&self, result: &EvaluationResult) -> String {
        ConsoleFormatter::format_ratio(result)
    }
}
