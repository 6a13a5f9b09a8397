//! Query runner pool sizing.

/// Default job queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Sizing parameters for [`QueryRunnerPool`](crate::runner::QueryRunnerPool).
///
/// Both values are clamped to at least 1, however they were configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    workers: usize,
    queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: Self::default_workers(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// One worker per available CPU.
    pub fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    // ==================== Builder Methods ====================

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    // ==================== Accessors ====================

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}
