//! Builder to construct named worker pools from configuration.

use crate::config::WorkerPoolConfig;
use crate::core::{PoolError, WorkerPool};

/// Builds a named [`WorkerPool`]. The name shows up in every log event the
/// pool and its workers emit.
#[derive(Debug, Clone)]
pub struct PoolBuilder {
    name: String,
    config: WorkerPoolConfig,
}

impl PoolBuilder {
    /// Start from the default configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, WorkerPoolConfig::default())
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(name: impl Into<String>, config: WorkerPoolConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Start from `HANDOFF_POOL_*` environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// `PoolError::InvalidConfig` if a variable is malformed.
    pub fn from_env(name: impl Into<String>) -> Result<Self, PoolError> {
        let config = WorkerPoolConfig::from_env().map_err(PoolError::InvalidConfig)?;
        Ok(Self::from_config(name, config))
    }

    /// Pool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkerPoolConfig {
        &self.config
    }

    /// Set the number of workers.
    #[must_use]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.config.worker_count = worker_count;
        self
    }

    /// Set the queue buffer size (`0` for direct handoff).
    #[must_use]
    pub fn queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.config.queue_capacity = queue_capacity;
        self
    }

    /// Set the worker thread stack size in bytes.
    #[must_use]
    pub fn thread_stack_size(mut self, stack_size: usize) -> Self {
        self.config.thread_stack_size = Some(stack_size);
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Validate the configuration and start the workers.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidConfig` if the configuration is invalid
    /// - `PoolError::Spawn` if a worker thread could not be started
    pub fn build<T: Send + 'static>(self) -> Result<WorkerPool<T>, PoolError> {
        WorkerPool::start(self.name, self.config)
    }
}
