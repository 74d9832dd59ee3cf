//! Task representation: a deferred computation plus the sending half of its
//! result handle.

#[cfg(feature = "tokio-runtime")]
use std::future::Future;
#[cfg(feature = "tokio-runtime")]
use std::pin::Pin;

use crossbeam_channel::{bounded, Sender};

use super::error::{AppResult, TaskError};
use super::handle::ResultHandle;

/// Unique identifier assigned to each submitted task, in submission order.
pub type TaskId = u64;

/// Result of executing one task: the produced value, or why there is none.
pub type Outcome<T> = Result<T, TaskError>;

type BlockingJob<T> = Box<dyn FnOnce() -> AppResult<T> + Send + 'static>;

#[cfg(feature = "tokio-runtime")]
type LocalFuture<T> = Pin<Box<dyn Future<Output = AppResult<T>> + 'static>>;

#[cfg(feature = "tokio-runtime")]
type AsyncJob<T> = Box<dyn FnOnce() -> LocalFuture<T> + Send + 'static>;

/// The computation carried by a task.
pub(crate) enum Job<T> {
    /// Plain closure run directly on the worker thread.
    Blocking(BlockingJob<T>),
    /// Future factory driven by the worker's own current-thread runtime.
    #[cfg(feature = "tokio-runtime")]
    Async(AsyncJob<T>),
}

impl<T: Send + 'static> Job<T> {
    pub(crate) fn blocking<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: Into<anyhow::Error>,
    {
        Self::Blocking(Box::new(move || -> AppResult<T> { f().map_err(Into::into) }))
    }

    #[cfg(feature = "tokio-runtime")]
    pub(crate) fn future<F, Fut, E>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        Self::Async(Box::new(move || -> LocalFuture<T> {
            Box::pin(async move { f().await.map_err(Into::<anyhow::Error>::into) })
        }))
    }
}

/// One unit of work in the shared queue.
pub(crate) struct Task<T> {
    pub(crate) id: TaskId,
    pub(crate) job: Job<T>,
    /// Capacity-one sender; written exactly once by the claiming worker.
    pub(crate) respond_to: Sender<Outcome<T>>,
}

impl<T> Task<T> {
    /// Pair a job with a fresh single-slot result channel.
    pub(crate) fn new(id: TaskId, job: Job<T>) -> (Self, ResultHandle<T>) {
        let (respond_to, rx) = bounded(1);
        (Self { id, job, respond_to }, ResultHandle::new(id, rx))
    }
}
