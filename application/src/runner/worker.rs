//! Query runner: a single worker of the pool.
//!
//! Each runner loops on the shared job queue. The receive is the only point
//! where an idle runner suspends, and it races the pool's shutdown token so
//! that idle runners exit promptly. A backend call that is already running
//! is allowed to finish.

use super::work_item::WorkItem;
use futures::FutureExt;
use srom_domain::{BackendOutcome, FailureReason};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

/// Shared receiving end of the job queue.
pub(crate) type SharedQueue = Arc<Mutex<mpsc::Receiver<WorkItem>>>;

/// Unrecoverable condition observed by a runner.
#[derive(Debug)]
pub(crate) struct FatalReport {
    pub worker_id: usize,
    pub reason: String,
}

pub(crate) struct QueryRunner {
    id: usize,
    queue: SharedQueue,
    shutdown: CancellationToken,
    fatal: mpsc::UnboundedSender<FatalReport>,
}

impl QueryRunner {
    pub(crate) fn new(
        id: usize,
        queue: SharedQueue,
        shutdown: CancellationToken,
        fatal: mpsc::UnboundedSender<FatalReport>,
    ) -> Self {
        Self {
            id,
            queue,
            shutdown,
            fatal,
        }
    }

    pub(crate) async fn run(self) {
        debug!(worker = self.id, "Query runner started");

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                next = Self::next_item(&self.queue) => next,
            };

            match next {
                Some(item) => self.execute(item).await,
                None if self.shutdown.is_cancelled() => break,
                None => {
                    // Only the controller closes the queue, and it cancels first.
                    let _ = self.fatal.send(FatalReport {
                        worker_id: self.id,
                        reason: "job queue closed while the pool was running".to_string(),
                    });
                    break;
                }
            }
        }

        debug!(worker = self.id, "Query runner exited");
    }

    async fn next_item(queue: &SharedQueue) -> Option<WorkItem> {
        queue.lock().await.recv().await
    }

    async fn execute(&self, item: WorkItem) {
        let WorkItem {
            backend,
            query,
            polarity,
            reply,
        } = item;

        if reply.is_closed() {
            debug!(
                worker = self.id,
                backend = backend.identity(),
                %polarity,
                "Skipping query, evaluator stopped waiting"
            );
            return;
        }

        trace!(worker = self.id, backend = backend.identity(), %polarity, "Query: {}", query);

        let outcome = match AssertUnwindSafe(backend.query(query.as_str()))
            .catch_unwind()
            .await
        {
            Ok(Ok(hits)) => {
                debug!(worker = self.id, backend = backend.identity(), %polarity, hits, "Query succeeded");
                BackendOutcome::Hits(hits)
            }
            Ok(Err(e)) => {
                warn!(worker = self.id, backend = backend.identity(), %polarity, "Query failed: {}", e);
                BackendOutcome::failed(e.to_string())
            }
            Err(_) => {
                error!(worker = self.id, backend = backend.identity(), %polarity, "Backend panicked");
                BackendOutcome::Failed(FailureReason::Panicked)
            }
        };

        if reply.send(outcome).is_err() {
            debug!(worker = self.id, "Outcome dropped, evaluator no longer waiting");
        }
    }
}
