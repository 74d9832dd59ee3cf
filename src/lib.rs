//! # Handoff Pool
//!
//! A bounded worker pool: a fixed number of long-lived worker threads take
//! tasks from one shared queue and report each task's outcome back through a
//! private, single-use result handle.
//!
//! ## Core Problem Solved
//!
//! Callers want to cap how many computations run at once while still
//! submitting work one piece at a time and collecting each result, failures
//! included, without writing their own synchronization.
//!
//! ## Key Features
//!
//! - **Bounded concurrency**: exactly `worker_count` threads, started at construction
//! - **Backpressure**: by default `submit` hands the task straight to an idle
//!   worker and blocks while all are busy
//! - **Per-task results**: every submission returns a [`ResultHandle`](core::ResultHandle)
//!   that yields exactly one [`Outcome`](core::Outcome)
//! - **Fault isolation**: task errors and panics become failure outcomes; workers keep running
//! - **Safe shutdown**: `wait` is idempotent and late submissions get `PoolError::Closed`
//! - **Async tasks**: with `tokio-runtime`, futures run on a per-worker current-thread runtime
//!
//! ## Example
//!
//! ```rust
//! use handoff_pool::core::{TaskError, WorkerPool};
//!
//! let pool = WorkerPool::<&'static str>::new(3)?;
//!
//! let handles = vec![
//!     pool.submit(|| Ok::<_, anyhow::Error>("result1"))?,
//!     pool.submit(|| Err(anyhow::anyhow!("error2")))?,
//!     pool.submit(|| Ok::<_, anyhow::Error>("result3"))?,
//! ];
//! pool.wait();
//!
//! let outcomes: Vec<_> = handles.into_iter().map(|h| h.recv()).collect();
//! assert_eq!(outcomes[0].as_ref().ok(), Some(&"result1"));
//! assert!(matches!(&outcomes[1], Err(TaskError::Failed(e)) if e.to_string() == "error2"));
//! assert_eq!(outcomes[2].as_ref().ok(), Some(&"result3"));
//! # Ok::<(), handoff_pool::core::PoolError>(())
//! ```

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Pool core: tasks, result handles, workers and shutdown.
pub mod core;
/// Configuration models for worker pools.
pub mod config;
/// Builders to construct pools from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
