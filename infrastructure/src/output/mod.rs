//! Output sink adapters
//!
//! - [`TracingOutput`] - logs term and ratio through `tracing`
//! - [`JsonlOutput`] - appends one JSON line per result to a file

mod jsonl_output;
mod tracing_output;

pub use jsonl_output::JsonlOutput;
pub use tracing_output::TracingOutput;
