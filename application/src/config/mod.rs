//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`PoolConfig`] - query runner pool sizing
//! - [`EvaluationParams`] - per-term join control (timeout)

pub mod evaluation_params;
pub mod pool_config;

pub use evaluation_params::EvaluationParams;
pub use pool_config::{DEFAULT_QUEUE_CAPACITY, PoolConfig};
