//! Progress reporting for term evaluation

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use srom_application::ProgressNotifier;
use srom_domain::{Polarity, Term};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Reports progress with one bar per term being evaluated.
///
/// Concurrent evaluations of the same term share one bar, which finishes
/// when the last of them completes.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, TermBar>>,
}

struct TermBar {
    bar: ProgressBar,
    active: usize,
    included: usize,
    total: usize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn term_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn bars(&self) -> std::sync::MutexGuard<'_, HashMap<String, TermBar>> {
        self.bars.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_evaluation_start(&self, term: &Term, total_queries: usize) {
        let mut bars = self.bars();
        if let Some(existing) = bars.get_mut(term.as_str()) {
            existing.bar.inc_length(total_queries as u64);
            existing.active += 1;
            return;
        }

        let pb = self.multi.add(ProgressBar::new(total_queries as u64));
        pb.set_style(Self::term_style());
        pb.set_prefix(term.to_string());
        pb.set_message("querying...");
        bars.insert(
            term.to_string(),
            TermBar {
                bar: pb,
                active: 1,
                included: 0,
                total: 0,
            },
        );
    }

    fn on_query_complete(&self, term: &Term, backend: &str, polarity: Polarity, success: bool) {
        if let Some(entry) = self.bars().get(term.as_str()) {
            let status = if success {
                format!("{} {} ({})", "v".green(), backend, polarity)
            } else {
                format!("{} {} ({})", "x".red(), backend, polarity)
            };
            entry.bar.set_message(status);
            entry.bar.inc(1);
        }
    }

    fn on_evaluation_complete(&self, term: &Term, included: usize, total: usize) {
        let mut bars = self.bars();
        let Some(entry) = bars.get_mut(term.as_str()) else {
            return;
        };
        entry.active -= 1;
        entry.included += included;
        entry.total += total;
        if entry.active > 0 {
            return;
        }

        if let Some(entry) = bars.remove(term.as_str()) {
            let summary = format!("{}/{} backends usable", entry.included, entry.total);
            if entry.included > 0 {
                entry.bar.finish_with_message(summary.green().to_string());
            } else {
                entry.bar.abandon_with_message(summary.red().to_string());
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_evaluation_start(&self, term: &Term, total_queries: usize) {
        eprintln!(
            "{} {} ({} queries)",
            "->".cyan(),
            term.as_str().bold(),
            total_queries
        );
    }

    fn on_query_complete(&self, term: &Term, backend: &str, polarity: Polarity, success: bool) {
        if success {
            eprintln!("  {} {}: {} {}", "v".green(), term, backend, polarity);
        } else {
            eprintln!("  {} {}: {} {} (failed)", "x".red(), term, backend, polarity);
        }
    }

    fn on_evaluation_complete(&self, term: &Term, included: usize, total: usize) {
        eprintln!("  {}: {}/{} backends usable", term, included, total);
    }
}
