//! Worker pool configuration.

use serde::{Deserialize, Serialize};

/// Environment variable for [`WorkerPoolConfig::worker_count`].
pub const ENV_WORKERS: &str = "HANDOFF_POOL_WORKERS";
/// Environment variable for [`WorkerPoolConfig::queue_capacity`].
pub const ENV_QUEUE_CAPACITY: &str = "HANDOFF_POOL_QUEUE_CAPACITY";
/// Environment variable for [`WorkerPoolConfig::thread_stack_size`].
pub const ENV_STACK_SIZE: &str = "HANDOFF_POOL_STACK_SIZE";
/// Environment variable for [`WorkerPoolConfig::thread_name_prefix`].
pub const ENV_THREAD_PREFIX: &str = "HANDOFF_POOL_THREAD_PREFIX";

const DEFAULT_THREAD_PREFIX: &str = "handoff-worker";

/// Worker pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerPoolConfig {
    /// Number of worker threads. Fixed for the life of the pool.
    pub worker_count: usize,
    /// Tasks that may wait in the queue ahead of the workers. `0` makes
    /// every submission a direct handoff to an idle worker.
    pub queue_capacity: usize,
    /// Stack size for worker threads; platform default when `None`.
    pub thread_stack_size: Option<usize>,
    /// Worker threads are named `{prefix}-{index}`.
    pub thread_name_prefix: String,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get(),
            queue_capacity: 0,
            thread_stack_size: None,
            thread_name_prefix: DEFAULT_THREAD_PREFIX.to_owned(),
        }
    }
}

impl WorkerPoolConfig {
    /// Default configuration: one worker per CPU, rendezvous queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the queue buffer size.
    #[must_use]
    pub const fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Set the worker thread stack size in bytes.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, stack_size: usize) -> Self {
        self.thread_stack_size = Some(stack_size);
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".into());
        }
        if self.thread_stack_size == Some(0) {
            return Err("thread_stack_size must be greater than 0".into());
        }
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        if self.thread_name_prefix.contains('\0') {
            return Err("thread_name_prefix must not contain NUL bytes".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading a `.env`
    /// file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns a description of the malformed variable or validation failure.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, using the
    /// `HANDOFF_POOL_*` variable names. Unset keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a description of the malformed variable or validation failure.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(value) = lookup(ENV_WORKERS) {
            cfg.worker_count = parse_usize(ENV_WORKERS, &value)?;
        }
        if let Some(value) = lookup(ENV_QUEUE_CAPACITY) {
            cfg.queue_capacity = parse_usize(ENV_QUEUE_CAPACITY, &value)?;
        }
        if let Some(value) = lookup(ENV_STACK_SIZE) {
            cfg.thread_stack_size = Some(parse_usize(ENV_STACK_SIZE, &value)?);
        }
        if let Some(value) = lookup(ENV_THREAD_PREFIX) {
            cfg.thread_name_prefix = value;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, String> {
    value
        .trim()
        .parse()
        .map_err(|e| format!("{key}: invalid value `{value}`: {e}"))
}
