//! Common test utilities for the snapdoc workflow tests.
//!
//! - `mocks`: recording document exporter and image fixtures
#![allow(dead_code)]


use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
