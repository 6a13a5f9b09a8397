//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-backend table followed by the verdict
    Full,
    /// Only the aggregate ratio
    Ratio,
    /// JSON output
    Json,
}

impl From<OutputFormat> for srom_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => srom_domain::OutputFormat::Full,
            OutputFormat::Ratio => srom_domain::OutputFormat::Ratio,
            OutputFormat::Json => srom_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for srom
#[derive(Parser, Debug)]
#[command(name = "srom")]
#[command(author, version, about = "Sucks-Rules-O-Meter - What does the internet think of a term?")]
#[command(long_about = r#"
srom measures public sentiment toward a term by counting search hits for
favorable phrases ("rust rules", "love rust") and unfavorable phrases
("rust sucks", "hate rust") on every configured search engine.

The ratio of positive to negative hits is computed per engine and averaged.
Engines that fail are left out of the average.

Configuration files are loaded from (in priority order):
1. SROM_* environment variables    e.g. SROM_POOL__WORKERS=4
2. --config <path>                 Explicit config file
3. ./srom.toml                     Project-level config
4. ~/.config/srom/config.toml      Global config

Example:
  srom rust
  srom -o ratio vim emacs
  srom --timeout 20 --jsonl results.jsonl "visual basic"
"#)]
pub struct Cli {
    /// Terms to evaluate (evaluated concurrently)
    #[arg(required_unless_present = "show_config", value_name = "TERM")]
    pub terms: Vec<String>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of query runners (overrides config)
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Per-term timeout in seconds (overrides config)
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append results as JSON lines to this file (overrides config)
    #[arg(long, value_name = "PATH")]
    pub jsonl: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
