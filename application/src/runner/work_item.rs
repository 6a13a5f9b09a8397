//! Work items and their single-slot outcome handoff.

use crate::ports::search_backend::SearchBackend;
use srom_domain::{BackendOutcome, ComposedQuery, FailureReason, Polarity};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// One query bound for one backend and polarity.
///
/// Created by the evaluator together with its [`PendingOutcome`]; the runner
/// that executes it delivers exactly one [`BackendOutcome`] back. If the item
/// is dropped undelivered, the pending side resolves to
/// [`FailureReason::Abandoned`].
pub struct WorkItem {
    pub(crate) backend: Arc<dyn SearchBackend>,
    pub(crate) query: ComposedQuery,
    pub(crate) polarity: Polarity,
    pub(crate) reply: oneshot::Sender<BackendOutcome>,
}

impl WorkItem {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        query: ComposedQuery,
        polarity: Polarity,
    ) -> (Self, PendingOutcome) {
        let (reply, rx) = oneshot::channel();
        let item = Self {
            backend,
            query,
            polarity,
            reply,
        };
        (item, PendingOutcome { rx })
    }

    pub fn backend_identity(&self) -> &str {
        self.backend.identity()
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn query(&self) -> &ComposedQuery {
        &self.query
    }
}

impl std::fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkItem")
            .field("backend", &self.backend.identity())
            .field("polarity", &self.polarity)
            .field("query", &self.query)
            .finish()
    }
}

/// Receiving end of a [`WorkItem`]'s outcome.
#[derive(Debug)]
pub struct PendingOutcome {
    rx: oneshot::Receiver<BackendOutcome>,
}

impl PendingOutcome {
    /// Wait for the outcome.
    pub async fn wait(self) -> BackendOutcome {
        self.rx
            .await
            .unwrap_or(BackendOutcome::Failed(FailureReason::Abandoned))
    }

    /// Wait for the outcome, giving up at `deadline` if one is set.
    pub async fn wait_until(self, deadline: Option<Instant>) -> BackendOutcome {
        match deadline {
            None => self.wait().await,
            Some(deadline) => tokio::time::timeout_at(deadline, self.wait())
                .await
                .unwrap_or(BackendOutcome::Failed(FailureReason::TimedOut)),
        }
    }
}
