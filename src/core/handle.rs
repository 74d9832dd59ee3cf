//! Per-task result handle.

use std::fmt;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

use super::error::{PoolError, TaskError};
use super::task::{Outcome, TaskId};

/// Receiving end of a task's single-slot result channel.
///
/// Exactly one [`Outcome`] is written by the worker that runs the task. The
/// handle is returned by `submit` before the task executes; reading blocks
/// until the worker has finished. Once the outcome has been taken, further
/// reads report [`TaskError::Lost`].
///
/// Dropping the handle is allowed at any time: the worker still runs the task
/// and silently discards the outcome.
pub struct ResultHandle<T> {
    id: TaskId,
    rx: Receiver<Outcome<T>>,
}

impl<T> ResultHandle<T> {
    pub(crate) const fn new(id: TaskId, rx: Receiver<Outcome<T>>) -> Self {
        Self { id, rx }
    }

    /// Identifier of the task this handle belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.id
    }

    /// Block until the task's outcome is available and return it.
    ///
    /// # Errors
    ///
    /// Returns the task's own failure, a caught panic, or
    /// [`TaskError::Lost`] if the outcome can no longer arrive.
    pub fn recv(self) -> Outcome<T> {
        self.rx.recv().unwrap_or(Err(TaskError::Lost))
    }

    /// Return the outcome if the worker has already delivered it.
    ///
    /// # Errors
    ///
    /// [`PoolError::NotReady`] while the task is still queued or running.
    pub fn try_recv(&self) -> Result<Outcome<T>, PoolError> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(outcome),
            Err(TryRecvError::Empty) => Err(PoolError::NotReady),
            Err(TryRecvError::Disconnected) => Ok(Err(TaskError::Lost)),
        }
    }

    /// Block for at most `timeout` waiting for the outcome.
    ///
    /// A timeout does not cancel the task; the handle can be read again.
    ///
    /// # Errors
    ///
    /// [`PoolError::Timeout`] if nothing arrived in time.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Outcome<T>, PoolError> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Ok(outcome),
            Err(RecvTimeoutError::Timeout) => Err(PoolError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Ok(Err(TaskError::Lost)),
        }
    }
}

#[cfg(feature = "tokio-runtime")]
impl<T: Send + 'static> ResultHandle<T> {
    /// Wait for the outcome from async code without blocking the runtime.
    ///
    /// The blocking read is moved onto tokio's blocking thread pool, so this
    /// must be awaited inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`recv`](Self::recv), plus [`TaskError::Runtime`] if the
    /// blocking read could not be scheduled.
    pub async fn recv_async(self) -> Outcome<T> {
        match tokio::task::spawn_blocking(move || self.recv()).await {
            Ok(outcome) => outcome,
            Err(e) => Err(TaskError::Runtime(e.to_string())),
        }
    }
}

impl<T> fmt::Debug for ResultHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandle")
            .field("task_id", &self.id)
            .field("ready", &!self.rx.is_empty())
            .finish()
    }
}
