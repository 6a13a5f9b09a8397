//! Query runner pool and its lifecycle controller.
//!
//! # Lifecycle
//!
//! ```text
//!            start()              shutdown() / fatal report
//!  Stopped ──────────> Running ─────────────────────────────> Stopping
//!     ^                                                          │
//!     └──────────────────── all runners exited ──────────────────┘
//! ```
//!
//! The controller is the single owner of the queue's sending side and the
//! only party that closes it. Runners never close the queue; they report
//! unrecoverable conditions on a separate channel, and a supervisor task
//! turns the first report into a shutdown.
//!
//! # Shutdown contract
//!
//! - Idle runners exit as soon as shutdown begins.
//! - A backend call already in progress finishes and its outcome is delivered.
//! - Work still queued when the last runner exits is dropped; its
//!   [`PendingOutcome`](super::PendingOutcome) resolves to `Abandoned`.
//! - Submissions after shutdown begins are rejected.

use super::work_item::WorkItem;
use super::worker::{FatalReport, QueryRunner, SharedQueue};
use crate::config::PoolConfig;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Errors returned by the pool controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Query runner pool is not running")]
    NotRunning,

    #[error("Query runner pool is already {0}")]
    AlreadyStarted(PoolState),

    #[error("Job queue closed")]
    QueueClosed,
}

/// Lifecycle state of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    Stopped,
    Running,
    Stopping,
}

impl PoolState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolState::Stopped => "stopped",
            PoolState::Running => "running",
            PoolState::Stopping => "stopping",
        }
    }
}

impl std::fmt::Display for PoolState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed-size pool of query runners sharing one job queue.
///
/// Cheap to clone; all clones control the same pool. Dropping the last
/// handle aborts any runners still alive.
#[derive(Clone)]
pub struct QueryRunnerPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    config: PoolConfig,
    state: watch::Sender<PoolState>,
    lifecycle: Mutex<Lifecycle>,
}

/// Everything a start or stop transition touches. State changes are only
/// published while this is locked, so a transition is never observed half done.
struct Lifecycle {
    generation: u64,
    queue: Option<mpsc::Sender<WorkItem>>,
    shutdown: CancellationToken,
    runners: JoinSet<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl QueryRunnerPool {
    /// Create a stopped pool
    pub fn new(config: PoolConfig) -> Self {
        let (state, _) = watch::channel(PoolState::Stopped);
        Self {
            inner: Arc::new(PoolInner {
                config,
                state,
                lifecycle: Mutex::new(Lifecycle {
                    generation: 0,
                    queue: None,
                    shutdown: CancellationToken::new(),
                    runners: JoinSet::new(),
                }),
            }),
        }
    }

    /// Number of runners spawned on start
    pub fn size(&self) -> usize {
        self.inner.config.workers()
    }

    pub fn state(&self) -> PoolState {
        *self.inner.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state() == PoolState::Running
    }

    /// Transition Stopped → Running: open a fresh queue and spawn the runners.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> Result<(), PoolError> {
        let mut lifecycle = lock(&self.inner.lifecycle);

        let current = self.state();
        if current != PoolState::Stopped {
            return Err(PoolError::AlreadyStarted(current));
        }

        let (tx, rx) = mpsc::channel(self.inner.config.queue_capacity());
        let queue: SharedQueue = Arc::new(tokio::sync::Mutex::new(rx));
        let token = CancellationToken::new();
        let (fatal_tx, fatal_rx) = mpsc::unbounded_channel();

        lifecycle.generation += 1;
        lifecycle.shutdown = token.clone();
        for id in 0..self.size() {
            let runner = QueryRunner::new(id, Arc::clone(&queue), token.clone(), fatal_tx.clone());
            lifecycle.runners.spawn(runner.run());
        }
        lifecycle.queue = Some(tx);

        tokio::spawn(Self::supervise(
            Arc::downgrade(&self.inner),
            lifecycle.generation,
            fatal_rx,
        ));

        self.inner.state.send_replace(PoolState::Running);
        drop(lifecycle);

        info!(
            workers = self.size(),
            queue_capacity = self.inner.config.queue_capacity(),
            "Query runner pool started"
        );
        Ok(())
    }

    /// Enqueue a work item for the runners.
    ///
    /// Waits for queue capacity when the queue is full.
    pub async fn submit(&self, item: WorkItem) -> Result<(), PoolError> {
        let sender = lock(&self.inner.lifecycle)
            .queue
            .clone()
            .ok_or(PoolError::NotRunning)?;
        sender.send(item).await.map_err(|_| PoolError::QueueClosed)
    }

    /// Transition Running → Stopping → Stopped.
    ///
    /// Idempotent: concurrent and repeated callers all return once the pool
    /// has reached `Stopped`.
    pub async fn shutdown(&self) {
        self.inner.stop("shutdown requested", None).await;
    }

    /// Wait until the pool reaches `Stopped`
    pub async fn wait_stopped(&self) {
        self.inner.wait_stopped().await;
    }

    /// Turns the first fatal report into a shutdown of the generation that
    /// raised it. Exits once every runner has dropped its reporting handle.
    async fn supervise(
        pool: Weak<PoolInner>,
        generation: u64,
        mut fatal_rx: mpsc::UnboundedReceiver<FatalReport>,
    ) {
        if let Some(report) = fatal_rx.recv().await {
            error!(
                worker = report.worker_id,
                generation,
                "Fatal query runner condition: {}", report.reason
            );
            if let Some(pool) = pool.upgrade() {
                pool.stop(&report.reason, Some(generation)).await;
            }
        }
    }

    /// Drop the queue's sending side without signalling shutdown, as a
    /// buggy caller would.
    #[cfg(test)]
    fn close_queue_unilaterally(&self) {
        lock(&self.inner.lifecycle).queue.take();
    }
}

impl PoolInner {
    /// Stop the pool. With `generation` set, only that run of the pool is
    /// stopped; a later restart is left alone.
    async fn stop(&self, reason: &str, generation: Option<u64>) {
        let runners = {
            let mut lifecycle = lock(&self.lifecycle);
            if let Some(generation) = generation
                && generation != lifecycle.generation
            {
                return;
            }

            if *self.state.borrow() == PoolState::Running {
                self.state.send_replace(PoolState::Stopping);
                // Cancel before closing so runners never mistake the close for a fault.
                lifecycle.shutdown.cancel();
                lifecycle.queue.take();
                Some(std::mem::take(&mut lifecycle.runners))
            } else {
                None
            }
        };

        let Some(mut runners) = runners else {
            self.wait_stopped().await;
            return;
        };

        info!("Stopping query runner pool: {}", reason);

        while let Some(joined) = runners.join_next().await {
            if let Err(e) = joined {
                warn!("Query runner task ended abnormally: {}", e);
            }
        }

        self.state.send_replace(PoolState::Stopped);
        info!("Query runner pool stopped");
    }

    async fn wait_stopped(&self) {
        let mut state = self.state.subscribe();
        let _ = state.wait_for(|s| *s == PoolState::Stopped).await;
    }
}
