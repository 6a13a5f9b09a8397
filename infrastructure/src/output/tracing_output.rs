//! Output sink that reports results through `tracing`.

use async_trait::async_trait;
use srom_application::{OutputSink, SinkError};
use srom_domain::EvaluationResult;
use tracing::info;

/// Logs each finished evaluation at `info`.
pub struct TracingOutput;

#[async_trait]
impl OutputSink for TracingOutput {
    async fn write(&self, result: &EvaluationResult) -> Result<(), SinkError> {
        info!(
            term = %result.term,
            included = result.included,
            excluded = result.excluded().count(),
            "{} {}",
            result.term,
            result.ratio
        );
        Ok(())
    }
}
