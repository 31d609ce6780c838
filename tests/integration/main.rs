//! Integration tests for ouxml-linkcheck
//!
//! These tests use wiremock to stand in for link targets and the web
//! archive, and tempfile for document corpora and output directories.

mod archive_tests;
mod check_tests;
mod resolver_tests;

use ouxml_linkcheck::config::Config;
use std::path::PathBuf;

/// A configuration suitable for tests: no throttle delay, short timeouts,
/// outputs under `output_dir`
pub fn create_test_config(output_dir: PathBuf) -> Config {
    let mut config = Config::default();
    config.checker.timeout_secs = 5;
    config.throttle.min_delay_ms = 0;
    config.throttle.jitter_ms = 0;
    config.output.directory = output_dir;
    config
}
