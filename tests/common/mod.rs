//! Common test utilities for integration tests.

pub mod fixtures;

use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use tempfile::TempDir;

pub use fixtures::*;

/// Fixed evaluation time shared by the integration tests.
pub fn eval_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Asserts two money amounts agree to within a micro-dollar.
#[track_caller]
pub fn assert_usd_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected ${}, got ${}",
        expected,
        actual
    );
}

/// Temporary directory for profile and config files.
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes `value` as JSON and returns the file path.
    pub fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize");
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
