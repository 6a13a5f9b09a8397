//! Application layer for srom
//!
//! This crate contains use cases, port definitions, the query runner pool,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod runner;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_QUEUE_CAPACITY, EvaluationParams, PoolConfig};
pub use ports::{
    output_sink::{CompositeOutput, NoOutput, OutputSink, SinkError},
    progress::{NoProgress, ProgressNotifier},
    search_backend::{BackendError, SearchBackend},
};
pub use runner::{PendingOutcome, PoolError, PoolState, QueryRunnerPool, WorkItem};
pub use use_cases::evaluate_term::{EvaluateError, EvaluateTermUseCase};
