//! Tests for configuration validation

use handoff_pool::config::WorkerPoolConfig;

#[test]
fn test_worker_pool_config_validation() {
    let valid = WorkerPoolConfig::new()
        .with_worker_count(4)
        .with_queue_capacity(16)
        .with_thread_stack_size(256 * 1024)
        .with_thread_name_prefix("valid");
    assert!(valid.validate().is_ok());
}

#[test]
fn test_worker_pool_config_invalid_worker_count() {
    let invalid = WorkerPoolConfig::new().with_worker_count(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_worker_pool_config_invalid_stack_size() {
    let invalid = WorkerPoolConfig::new().with_thread_stack_size(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_worker_pool_config_invalid_prefix() {
    assert!(WorkerPoolConfig::new().with_thread_name_prefix("").validate().is_err());
    assert!(WorkerPoolConfig::new().with_thread_name_prefix("bad\0name").validate().is_err());
}

#[test]
fn test_worker_pool_config_from_json() {
    let json = r#"{
        "worker_count": 8,
        "queue_capacity": 0,
        "thread_stack_size": 1048576,
        "thread_name_prefix": "ingest"
    }"#;

    let config = WorkerPoolConfig::from_json_str(json).expect("valid config");
    assert_eq!(config.worker_count, 8);
    assert_eq!(config.queue_capacity, 0);
    assert_eq!(config.thread_stack_size, Some(1_048_576));
    assert_eq!(config.thread_name_prefix, "ingest");
}

#[test]
fn test_worker_pool_config_from_json_partial() {
    let config = WorkerPoolConfig::from_json_str(r#"{ "worker_count": 2 }"#).expect("valid config");
    assert_eq!(config.worker_count, 2);
    assert_eq!(config.queue_capacity, 0);
    assert_eq!(config.thread_name_prefix, "handoff-worker");
}

#[test]
fn test_worker_pool_config_from_json_invalid() {
    let err = WorkerPoolConfig::from_json_str(r#"{ "worker_count": 0 }"#).unwrap_err();
    assert_eq!(err, "worker_count must be greater than 0");

    let err = WorkerPoolConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_worker_pool_config_json_roundtrip_shape() {
    let config = WorkerPoolConfig::new().with_worker_count(3);
    let value = serde_json::to_value(&config).expect("serializable");
    assert_eq!(value["worker_count"], 3);
    assert_eq!(value["queue_capacity"], 0);
    assert!(value["thread_stack_size"].is_null());
}
