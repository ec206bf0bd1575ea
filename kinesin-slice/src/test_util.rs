//! Utility functions for testing

use tracing_subscriber::EnvFilter;

/// create vec holding 0, 1, ..., length - 1
pub fn sequence(length: usize) -> Vec<u32> {
    (0..length as u32).collect()
}

/// send tracing output through the test harness, filtered by RUST_LOG
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
