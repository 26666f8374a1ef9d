//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the roombook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; roombook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("roombook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// `ROOMBOOK_*` variables from the outer environment are cleared so
    /// tests never see a developer's settings.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roombook").expect("Failed to find roombook binary");
        for key in [
            "ROOMBOOK_DATA_DIR",
            "ROOMBOOK_BUSY_TIMEOUT",
            "ROOMBOOK_DISABLE_AUTOINIT",
            "ROOMBOOK_DEFAULT_PAGE_SIZE",
            "ROOMBOOK_MAX_PAGE_SIZE",
            "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
            "ROOMBOOK_OUTPUT_FORMAT",
            "ROOMBOOK_LOG_MODE",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("roombook.db")
    }

    /// Write `<data_dir>/config.yaml`, creating the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Create a reservation and return its id.
    ///
    /// # Panics
    /// Panics if the create command fails or doesn't print an id.
    pub fn create(&self, user: i64, room: i64, start: &str, end: &str) -> i64 {
        let output = self
            .command()
            .arg("create")
            .arg("--user")
            .arg(user.to_string())
            .arg("--room")
            .arg(room.to_string())
            .arg("--start")
            .arg(start)
            .arg("--end")
            .arg(end)
            .output()
            .expect("Failed to run create command");

        assert!(
            output.status.success(),
            "Create failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        parse_id(&String::from_utf8(output.stdout).expect("Invalid UTF-8 in output"))
    }

    /// Approve a reservation, asserting success.
    pub fn approve(&self, id: i64) {
        self.command()
            .arg("approve")
            .arg(id.to_string())
            .assert()
            .success();
    }

    /// Fetch a reservation as JSON.
    pub fn get_json(&self, id: i64) -> serde_json::Value {
        let output = self
            .command()
            .arg("get")
            .arg(id.to_string())
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run get command");

        assert!(
            output.status.success(),
            "Get failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }

    /// Status of a reservation as printed by `get`.
    pub fn status_of(&self, id: i64) -> String {
        self.get_json(id)["status"]
            .as_str()
            .expect("status should be a string")
            .to_string()
    }

    /// List all reservations as JSON.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .arg("list")
            .arg("--all")
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a reservation id from `create` output.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output
        .trim()
        .parse()
        .expect("Output is not a valid reservation id")
}
