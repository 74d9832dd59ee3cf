//! Tests for builder modules

use handoff_pool::builders::pool_builder::PoolBuilder;
use handoff_pool::config::WorkerPoolConfig;

#[test]
fn test_pool_builder_defaults() {
    let builder = PoolBuilder::new("pool1");
    assert_eq!(builder.name(), "pool1");
    assert_eq!(builder.config(), &WorkerPoolConfig::default());
}

#[test]
fn test_pool_builder_overrides() {
    let config = WorkerPoolConfig::new().with_worker_count(2);
    let builder = PoolBuilder::from_config("pool2", config)
        .queue_capacity(5)
        .thread_stack_size(512 * 1024)
        .thread_name_prefix("p2");

    assert_eq!(builder.config().worker_count, 2);
    assert_eq!(builder.config().queue_capacity, 5);
    assert_eq!(builder.config().thread_stack_size, Some(512 * 1024));
    assert_eq!(builder.config().thread_name_prefix, "p2");
}

#[test]
fn test_pool_builder_build_and_wait() {
    let pool = PoolBuilder::new("pool3")
        .worker_count(2)
        .build::<usize>()
        .expect("Failed to build pool");
    assert_eq!(pool.worker_count(), 2);

    let handle = pool.submit(|| Ok::<_, anyhow::Error>(40 + 2)).expect("Failed to submit");
    pool.wait();
    assert_eq!(handle.recv().unwrap(), 42);
}
