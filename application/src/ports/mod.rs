//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod output_sink;
pub mod progress;
pub mod search_backend;
