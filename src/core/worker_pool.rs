//! Bounded worker pool with dedicated OS threads.
//!
//! A fixed set of worker threads consume tasks from one shared crossbeam
//! channel. With the default capacity of zero the channel is a rendezvous:
//! `submit` hands a task directly to an idle worker and blocks while every
//! worker is busy, so the caller can never get ahead of the pool.
//!
//! # Example
//!
//! ```rust
//! use handoff_pool::core::WorkerPool;
//!
//! let pool = WorkerPool::<String>::new(2)?;
//! let first = pool.submit(|| Ok::<_, anyhow::Error>("result1".to_string()))?;
//! let second = pool.submit(|| Err::<String, _>(anyhow::anyhow!("task error")))?;
//! pool.wait();
//!
//! assert_eq!(first.recv()?, "result1");
//! assert_eq!(second.recv().unwrap_err().to_string(), "task error");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod pool;
mod worker;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

pub use pool::WorkerPool;

/// Statistics about pool utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Number of workers the pool was built with.
    pub worker_count: usize,

    /// Worker threads that have not exited yet.
    pub live_workers: usize,

    /// Tasks currently executing.
    pub active_tasks: u64,

    /// Tasks accepted by `submit`.
    pub submitted_tasks: u64,

    /// Tasks that finished, whatever their outcome.
    pub completed_tasks: u64,

    /// Tasks that returned an error.
    pub failed_tasks: u64,

    /// Tasks that panicked.
    pub panicked_tasks: u64,
}

/// Internal counters for pool statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub live_workers: AtomicUsize,
    pub active_tasks: AtomicU64,
    pub submitted_tasks: AtomicU64,
    pub completed_tasks: AtomicU64,
    pub failed_tasks: AtomicU64,
    pub panicked_tasks: AtomicU64,
}

impl PoolCounters {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self, worker_count: usize) -> PoolStats {
        PoolStats {
            worker_count,
            live_workers: self.live_workers.load(Ordering::Acquire),
            active_tasks: self.active_tasks.load(Ordering::Relaxed),
            submitted_tasks: self.submitted_tasks.load(Ordering::Relaxed),
            completed_tasks: self.completed_tasks.load(Ordering::Relaxed),
            failed_tasks: self.failed_tasks.load(Ordering::Relaxed),
            panicked_tasks: self.panicked_tasks.load(Ordering::Relaxed),
        }
    }
}
