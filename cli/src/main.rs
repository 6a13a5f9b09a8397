//! CLI entrypoint for srom
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use srom_application::{
    CompositeOutput, EvaluateError, EvaluateTermUseCase, NoProgress, OutputSink,
    ProgressNotifier, QueryRunnerPool, SearchBackend,
};
use srom_domain::{EvaluationResult, OutputFormat, Term};
use srom_infrastructure::{ConfigLoader, FileConfig, JsonlOutput, TracingOutput};
use srom_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting srom");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let mut has_errors = false;
    for issue in config.validate() {
        eprintln!("{}", issue);
        has_errors |= issue.is_error();
    }
    if has_errors {
        bail!("Invalid configuration");
    }

    let mut pool_config = config.pool.to_pool_config();
    if let Some(workers) = cli.workers {
        pool_config = pool_config.with_workers(workers);
    }
    let mut params = config.evaluation.to_params();
    if let Some(timeout) = cli.timeout {
        params = params.with_timeout(Some(std::time::Duration::from_secs(timeout)));
    }
    let (templates, _) = config.templates.to_sentiment_templates();
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    ConsoleFormatter::set_color_enabled(config.output.color && !cli.no_color);

    // === Dependency Injection ===
    let backends = build_backends(&config)?;
    if backends.is_empty() {
        bail!("No search backends configured. Add a [backends.google] or [backends.azure] section.");
    }
    let sink = build_sink(&cli, &config)?;

    let pool = QueryRunnerPool::new(pool_config);
    pool.start()?;

    let use_case = Arc::new(
        EvaluateTermUseCase::new(pool.clone(), backends, templates, sink).with_params(params),
    );
    // Bars and log lines on the same stderr garble each other
    let progress: Arc<dyn ProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else if cli.verbose > 0 && cli.log_file.is_none() {
        Arc::new(SimpleProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    // === Evaluate all terms concurrently ===
    let mut join_set = JoinSet::new();
    for (index, raw) in cli.terms.iter().cloned().enumerate() {
        let use_case = Arc::clone(&use_case);
        let progress = Arc::clone(&progress);
        join_set.spawn(async move {
            let outcome: Result<EvaluationResult, EvaluateError> = async {
                let term = Term::new(raw.as_str())?;
                use_case.execute_with_progress(term, progress.as_ref()).await
            }
            .await;
            (index, raw, outcome)
        });
    }

    let mut outcomes: Vec<Option<(String, Result<EvaluationResult, EvaluateError>)>> =
        (0..cli.terms.len()).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, raw, outcome)) => outcomes[index] = Some((raw, outcome)),
            Err(e) => warn!("Evaluation task failed: {}", e),
        }
    }

    pool.shutdown().await;

    // === Output ===
    let mut failed = 0;
    for (index, slot) in outcomes.into_iter().enumerate() {
        match slot {
            Some((_, Ok(result))) => println!("{}", ConsoleFormatter::render(&result, format)),
            Some((raw, Err(e))) => {
                failed += 1;
                eprintln!("{}", ConsoleFormatter::format_error(&raw, &e));
            }
            None => {
                failed += 1;
                eprintln!(
                    "{}",
                    ConsoleFormatter::format_error(&cli.terms[index], &"evaluation task aborted")
                );
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} term(s) could not be evaluated", failed, cli.terms.len());
    }
    Ok(())
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &cli.log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

#[cfg(feature = "web-backends")]
fn build_backends(config: &FileConfig) -> Result<Vec<Arc<dyn SearchBackend>>> {
    Ok(srom_infrastructure::build_backends(&config.backends)?)
}

#[cfg(not(feature = "web-backends"))]
fn build_backends(config: &FileConfig) -> Result<Vec<Arc<dyn SearchBackend>>> {
    if !config.backends.is_empty() {
        warn!("Built without the web-backends feature; ignoring [backends] configuration");
    }
    Ok(Vec::new())
}

/// Results always go to the log; `--jsonl` or `output.jsonl_path` adds a file.
fn build_sink(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn OutputSink>> {
    let mut sinks: Vec<Arc<dyn OutputSink>> = vec![Arc::new(TracingOutput)];

    if let Some(path) = cli.jsonl.as_ref().or(config.output.jsonl_path.as_ref()) {
        let output = JsonlOutput::open(path)
            .with_context(|| format!("Could not open result file {}", path.display()))?;
        debug!("Writing results to {}", output.path().display());
        sinks.push(Arc::new(output));
    }

    Ok(Arc::new(CompositeOutput::new(sinks)))
}
