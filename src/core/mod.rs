//! Pool core: tasks, result handles, workers and the pool itself.

pub mod error;
pub mod handle;
pub mod task;
pub mod worker_pool;

pub use error::{AppResult, PoolError, TaskError};
pub use handle::ResultHandle;
pub use task::{Outcome, TaskId};
pub use worker_pool::{PoolStats, WorkerPool};
