//! Tests for error types

use handoff_pool::core::{PoolError, TaskError};
use std::time::Duration;

#[test]
fn test_closed_error() {
    let err = PoolError::Closed;
    assert_eq!(format!("{}", err), "pool is closed");
}

#[test]
fn test_queue_full_error() {
    let err = PoolError::QueueFull;
    assert_eq!(format!("{}", err), "no worker ready to accept task");
}

#[test]
fn test_spawn_error_keeps_source() {
    let err = PoolError::Spawn {
        worker_id: 3,
        source: std::io::Error::other("out of threads"),
    };
    assert_eq!(format!("{}", err), "failed to spawn worker 3: out of threads");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_timeout_error() {
    let err = PoolError::Timeout(Duration::from_secs(2));
    assert_eq!(format!("{}", err), "timed out after 2s waiting for task result");
}

#[test]
fn test_task_failure_keeps_context() {
    let inner = anyhow::anyhow!("disk full").context("writing chunk 4");
    let err = TaskError::Failed(inner);
    assert_eq!(format!("{}", err), "writing chunk 4");
    assert_eq!(format!("{:#}", err), "writing chunk 4: disk full");
}

#[test]
fn test_task_panic_error() {
    let err = TaskError::Panicked("index out of bounds".to_string());
    assert!(err.is_panic());
    assert_eq!(format!("{}", err), "task panicked: index out of bounds");
}

#[test]
fn test_task_lost_error() {
    assert_eq!(format!("{}", TaskError::Lost), "task result lost before delivery");
}
