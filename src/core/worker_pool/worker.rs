//! Worker thread loop.

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use crate::config::WorkerPoolConfig;
use crate::core::error::TaskError;
use crate::core::task::{Job, Outcome, Task};

use super::PoolCounters;

/// Lazily-built runtime for async tasks. Blocking-only workloads never pay
/// for one.
#[derive(Default)]
struct WorkerRuntime {
    #[cfg(feature = "tokio-runtime")]
    rt: Option<tokio::runtime::Runtime>,
}

impl WorkerRuntime {
    #[cfg(feature = "tokio-runtime")]
    fn block_on<F: std::future::Future>(&mut self, fut: F) -> Result<F::Output, TaskError> {
        if self.rt.is_none() {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| TaskError::Runtime(e.to_string()))?;
            self.rt = Some(rt);
        }
        match self.rt.as_ref() {
            Some(rt) => Ok(rt.block_on(fut)),
            None => Err(TaskError::Runtime("runtime not initialized".into())),
        }
    }

    /// Throw the runtime away after a panic unwound through it.
    fn reset(&mut self) {
        #[cfg(feature = "tokio-runtime")]
        {
            self.rt = None;
        }
    }
}

/// Decrements the live-worker count when the thread exits, however it exits.
struct LiveGuard(Arc<PoolCounters>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.live_workers.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Spawn a worker thread.
pub(super) fn spawn_worker<T: Send + 'static>(
    pool_name: &str,
    worker_id: usize,
    config: &WorkerPoolConfig,
    task_rx: Receiver<Task<T>>,
    counters: Arc<PoolCounters>,
) -> io::Result<JoinHandle<()>> {
    let mut builder =
        thread::Builder::new().name(format!("{}-{worker_id}", config.thread_name_prefix));
    if let Some(stack_size) = config.thread_stack_size {
        builder = builder.stack_size(stack_size);
    }

    let pool_name = pool_name.to_owned();
    counters.live_workers.fetch_add(1, Ordering::AcqRel);
    let guard = LiveGuard(Arc::clone(&counters));

    // On spawn failure the closure is dropped unrun, which drops the guard.
    builder.spawn(move || {
        let _guard = guard;
        run_worker(&pool_name, worker_id, &task_rx, &counters);
    })
}

fn run_worker<T>(
    pool_name: &str,
    worker_id: usize,
    task_rx: &Receiver<Task<T>>,
    counters: &PoolCounters,
) {
    debug!(pool = pool_name, worker_id = worker_id, "Worker thread started");
    let mut runtime = WorkerRuntime::default();

    // Ends once every sender is gone and the queue is empty.
    for task in task_rx {
        let Task { id, job, respond_to } = task;
        counters.active_tasks.fetch_add(1, Ordering::Relaxed);
        debug!(pool = pool_name, worker_id = worker_id, task_id = id, "Worker executing task");

        let outcome = execute(job, &mut runtime);
        match &outcome {
            Ok(_) => {}
            Err(TaskError::Panicked(message)) => {
                counters.panicked_tasks.fetch_add(1, Ordering::Relaxed);
                warn!(
                    pool = pool_name,
                    worker_id = worker_id,
                    task_id = id,
                    panic = %message,
                    "Task panicked; worker continues"
                );
            }
            Err(_) => {
                counters.failed_tasks.fetch_add(1, Ordering::Relaxed);
            }
        }

        if respond_to.send(outcome).is_err() {
            debug!(pool = pool_name, task_id = id, "Result handle dropped, outcome discarded");
        }

        counters.active_tasks.fetch_sub(1, Ordering::Relaxed);
        counters.completed_tasks.fetch_add(1, Ordering::Relaxed);
        debug!(pool = pool_name, worker_id = worker_id, task_id = id, "Worker completed task");
    }

    debug!(pool = pool_name, worker_id = worker_id, "Worker channel closed, exiting");
}

/// Run one job behind a panic barrier.
fn execute<T>(job: Job<T>, runtime: &mut WorkerRuntime) -> Outcome<T> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| match job {
        Job::Blocking(f) => Ok(f()),
        #[cfg(feature = "tokio-runtime")]
        Job::Async(f) => runtime.block_on(f()),
    }));

    match result {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(TaskError::Failed(e)),
        Ok(Err(e)) => Err(e),
        Err(payload) => {
            runtime.reset();
            Err(TaskError::Panicked(panic_message(payload.as_ref())))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
