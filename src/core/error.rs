//! Error types for pool operations and task outcomes.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the pool itself, never by the tasks it runs.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The pool has been closed by `wait` (or dropped); no more tasks are accepted.
    #[error("pool is closed")]
    Closed,
    /// Non-blocking submission found no worker ready to take the task.
    #[error("no worker ready to accept task")]
    QueueFull,
    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        /// Index of the worker that could not be started.
        worker_id: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A result handle read timed out.
    #[error("timed out after {0:?} waiting for task result")]
    Timeout(Duration),
    /// A non-blocking result read found no outcome yet.
    #[error("task result not ready")]
    NotReady,
}

/// Failure half of an [`Outcome`](super::Outcome).
#[derive(Debug, Error)]
pub enum TaskError {
    /// The task ran and returned an error.
    #[error(transparent)]
    Failed(anyhow::Error),
    /// The task panicked; the worker caught it and kept running.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// The result handle was closed before an outcome was written.
    #[error("task result lost before delivery")]
    Lost,
    /// An async task could not get a runtime on its worker.
    #[error("worker runtime unavailable: {0}")]
    Runtime(String),
}

impl TaskError {
    /// Returns `true` if the task itself returned an error.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` if the task panicked.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
