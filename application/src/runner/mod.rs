//! Query runner pool
//!
//! A fixed set of runners pulls [`WorkItem`]s from one bounded queue and
//! executes them against their backend. The [`QueryRunnerPool`] owns the
//! queue and drives the Stopped → Running → Stopping → Stopped lifecycle.

mod pool;
mod work_item;
mod worker;

pub use pool::{PoolError, PoolState, QueryRunnerPool};
pub use work_item::{PendingOutcome, WorkItem};
