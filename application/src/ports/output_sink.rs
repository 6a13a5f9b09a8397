//! Output sink port
//!
//! Defines where finished [`EvaluationResult`]s go: a log, a file, a
//! database. Writing is awaited by the evaluator and its error is surfaced
//! to the caller unchanged.

use async_trait::async_trait;
use srom_domain::EvaluationResult;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while writing an evaluation result
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Destination for finished evaluations
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Persist or report one result.
    async fn write(&self, result: &EvaluationResult) -> Result<(), SinkError>;
}

/// No-op sink for tests and when output persistence is disabled.
pub struct NoOutput;

#[async_trait]
impl OutputSink for NoOutput {
    async fn write(&self, _result: &EvaluationResult) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Fan-out sink: writes to every inner sink in order.
///
/// All sinks are attempted; the first error is returned.
pub struct CompositeOutput {
    sinks: Vec<Arc<dyn OutputSink>>,
}

impl CompositeOutput {
    pub fn new(sinks: Vec<Arc<dyn OutputSink>>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl OutputSink for CompositeOutput {
    async fn write(&self, result: &EvaluationResult) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.write(result).await
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
