//! Tests for utility functions

use handoff_pool::util::{init_test_tracing, init_tracing, DEFAULT_FILTER};

#[test]
fn test_default_filter_targets_crate() {
    assert!(DEFAULT_FILTER.starts_with("handoff_pool"));
}

#[test]
fn test_init_tracing_is_repeatable() {
    init_test_tracing();
    init_tracing();
    init_test_tracing();
    tracing::info!("tracing initialized twice without panicking");
}
