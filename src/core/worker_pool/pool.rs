//! `WorkerPool`: submission, close-once queue and drain.

#[cfg(feature = "tokio-runtime")]
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::WorkerPoolConfig;
use crate::core::error::PoolError;
use crate::core::handle::ResultHandle;
use crate::core::task::{Job, Task};

use super::worker::spawn_worker;
use super::{PoolCounters, PoolStats};

const DEFAULT_POOL_NAME: &str = "handoff";

/// Fixed-size pool of worker threads fed by a shared handoff queue.
///
/// # Design
///
/// - **Backpressure**: with `queue_capacity == 0` a submission completes only
///   when a worker takes the task, so at most `worker_count` tasks execute at
///   once and none pile up in memory.
/// - **Close once**: the pool's sender lives in a `Mutex<Option<_>>`; `wait`
///   takes it exactly once. Later submissions see `None` and get
///   [`PoolError::Closed`].
/// - **Drain**: a submission that cloned the sender before the close still
///   completes its handoff, and workers only exit once every sender is gone
///   and the queue is empty, so `wait` never strands an accepted task.
pub struct WorkerPool<T: Send + 'static> {
    /// Pool name used in log fields.
    name: String,

    /// Pool configuration.
    config: WorkerPoolConfig,

    /// Task sender (to workers). `None` once closed.
    task_tx: Mutex<Option<Sender<Task<T>>>>,

    /// Worker thread handles, drained by `wait`.
    workers: Mutex<Vec<JoinHandle<()>>>,

    /// Pool statistics counters.
    counters: Arc<PoolCounters>,

    /// Set by the first `wait` (or drop).
    closed: AtomicBool,

    /// Task ID counter.
    task_id_counter: AtomicU64,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Create a pool with `worker_count` workers and default settings.
    ///
    /// All workers are running and idle when this returns.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidConfig` if `worker_count` is zero
    /// - `PoolError::Spawn` if a worker thread could not be started
    pub fn new(worker_count: usize) -> Result<Self, PoolError> {
        Self::with_config(WorkerPoolConfig::new().with_worker_count(worker_count))
    }

    /// Create a pool from an explicit configuration.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidConfig` if the configuration is invalid
    /// - `PoolError::Spawn` if a worker thread could not be started
    pub fn with_config(config: WorkerPoolConfig) -> Result<Self, PoolError> {
        Self::start(DEFAULT_POOL_NAME.to_owned(), config)
    }

    pub(crate) fn start(name: String, config: WorkerPoolConfig) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;

        let (task_tx, task_rx) = bounded::<Task<T>>(config.queue_capacity);
        let counters = Arc::new(PoolCounters::default());
        let mut workers = Vec::with_capacity(config.worker_count);

        for worker_id in 0..config.worker_count {
            match spawn_worker(&name, worker_id, &config, task_rx.clone(), Arc::clone(&counters)) {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    // Closing the queue lets the workers already started exit.
                    drop(task_tx);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    warn!(pool = %name, worker_id = worker_id, error = %source, "Failed to spawn worker");
                    return Err(PoolError::Spawn { worker_id, source });
                }
            }
        }

        info!(
            pool = %name,
            worker_count = config.worker_count,
            queue_capacity = config.queue_capacity,
            "WorkerPool initialized"
        );

        Ok(Self {
            name,
            config,
            task_tx: Mutex::new(Some(task_tx)),
            workers: Mutex::new(workers),
            counters,
            closed: AtomicBool::new(false),
            task_id_counter: AtomicU64::new(0),
        })
    }

    /// Submit a task, blocking until a worker (or a queue slot) takes it.
    ///
    /// The returned handle yields the task's [`Outcome`](crate::core::Outcome)
    /// once it has run. An `Err` returned by `f` is delivered through the
    /// handle, not here.
    ///
    /// # Errors
    ///
    /// `PoolError::Closed` if `wait` has started or the pool was dropped.
    pub fn submit<F, E>(&self, f: F) -> Result<ResultHandle<T>, PoolError>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: Into<anyhow::Error>,
    {
        self.dispatch(Job::blocking(f), true)
    }

    /// Submit a task only if a worker (or a queue slot) is ready right now.
    ///
    /// # Errors
    ///
    /// - `PoolError::QueueFull` if every worker is busy
    /// - `PoolError::Closed` if the pool is closed
    pub fn try_submit<F, E>(&self, f: F) -> Result<ResultHandle<T>, PoolError>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: Into<anyhow::Error>,
    {
        self.dispatch(Job::blocking(f), false)
    }

    /// Submit an async task, driven to completion on the worker's own
    /// current-thread tokio runtime.
    ///
    /// The closure is sent to the worker; the future it returns is created
    /// there and need not be `Send`.
    ///
    /// # Errors
    ///
    /// `PoolError::Closed` if the pool is closed.
    #[cfg(feature = "tokio-runtime")]
    pub fn submit_future<F, Fut, E>(&self, f: F) -> Result<ResultHandle<T>, PoolError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.dispatch(Job::future(f), true)
    }

    fn dispatch(&self, job: Job<T>, block: bool) -> Result<ResultHandle<T>, PoolError> {
        // Clone under a brief lock; the handoff itself happens unlocked so a
        // concurrent `wait` is never stuck behind a blocked submitter.
        let task_tx = self.task_tx.lock().clone().ok_or(PoolError::Closed)?;

        let task_id = self.task_id_counter.fetch_add(1, Ordering::Relaxed);
        let (task, handle) = Task::new(task_id, job);

        if block {
            task_tx.send(task).map_err(|_| PoolError::Closed)?;
        } else {
            match task_tx.try_send(task) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    debug!(pool = %self.name, task_id = task_id, "No worker ready, task rejected");
                    return Err(PoolError::QueueFull);
                }
                Err(TrySendError::Disconnected(_)) => return Err(PoolError::Closed),
            }
        }

        self.counters.submitted_tasks.fetch_add(1, Ordering::Relaxed);
        debug!(pool = %self.name, task_id = task_id, "Task handed to worker pool");
        Ok(handle)
    }

    /// Stop accepting tasks, let the workers drain the queue, and join them.
    ///
    /// When this returns every accepted task has run and delivered its
    /// outcome, and no worker thread remains. Calling it again (even
    /// concurrently) waits for the same drain and does nothing else.
    ///
    /// Called from inside a task running on this pool, it closes the queue
    /// and joins every other worker; the calling worker is detached and exits
    /// once its current task returns.
    pub fn wait(&self) {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        if first {
            info!(pool = %self.name, "Shutting down worker pool");
        }

        // Dropping the pool's sender closes the queue once in-flight
        // submissions release their clones.
        drop(self.task_tx.lock().take());

        let current = thread::current().id();
        let mut workers = self.workers.lock();
        let worker_count = workers.len();
        for (worker_id, handle) in workers.drain(..).enumerate() {
            if handle.thread().id() == current {
                debug!(pool = %self.name, worker_id = worker_id, "wait called from a worker, detaching it");
            } else if handle.join().is_ok() {
                debug!(pool = %self.name, worker_id = worker_id, "Worker joined successfully");
            } else {
                warn!(pool = %self.name, worker_id = worker_id, "Worker thread panicked");
            }
        }

        if worker_count > 0 {
            info!(pool = %self.name, worker_count = worker_count, "Worker pool shut down complete");
        }
    }

    /// Whether `wait` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of workers the pool was built with.
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.config.worker_count
    }

    /// Pool name used in log fields.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.config.worker_count)
    }
}

impl<T: Send + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        // Close the queue but don't join: workers finish what was accepted
        // and exit on their own.
        if !self.closed.swap(true, Ordering::AcqRel) {
            *self.task_tx.get_mut() = None;
            debug!(pool = %self.name, "WorkerPool dropped without wait - workers will drain and detach");
        }
    }
}

impl<T: Send + 'static> std::fmt::Debug for WorkerPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
