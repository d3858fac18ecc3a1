//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with an isolated data directory
//! - Command builder helpers that shield tests from the caller's `INNKEEP_*`
//!   environment
//! - Seeders for guests, rooms and menu items

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every environment variable the binary reads.
const INNKEEP_ENV_VARS: [&str; 6] = [
    "INNKEEP_DATA_DIR",
    "INNKEEP_LOG_MODE",
    "INNKEEP_OUTPUT_FORMAT",
    "INNKEEP_CURRENCY_SYMBOL",
    "INNKEEP_EXPIRY_GRACE_HOURS",
    "INNKEEP_SERVICE_CHARGE_PERCENT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the store creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("innkeep-data");

        Self { temp_dir, data_dir }
    }

    /// Get a command builder without `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        for var in INNKEEP_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of a file in the data directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Get the data directory.
    pub fn path(&self) -> &Path {
        &self.data_dir
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run innkeep");
        assert!(
            output.status.success(),
            "innkeep {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Register a guest with valid details.
    pub fn add_guest(&self, id: &str) {
        self.run(&[
            "guest",
            "add",
            "--id",
            id,
            "--name",
            "Tan Ah Kow",
            "--gender",
            "M",
            "--contact",
            "91234567",
            "--credit-card",
            "4111111111111111",
            "--nationality",
            "Singaporean",
        ]);
    }

    /// Add a vacant room at 100 weekday / 80 weekend.
    pub fn add_room(&self, floor: u32, number: u32, room_type: &str) -> String {
        self.run(&[
            "room",
            "add",
            "--floor",
            &floor.to_string(),
            "--number",
            &number.to_string(),
            "--type",
            room_type,
            "--rate",
            "100",
            "--weekend-rate",
            "80",
            "--wifi",
        ])
    }

    /// Add a menu item.
    pub fn add_menu_item(&self, name: &str, price: &str) {
        self.run(&["menu", "add", "--name", name, "--price", price]);
    }

    /// Book and check in `guest` now, returning the reservation code.
    pub fn walk_in(&self, guest: &str, room_type: &str) -> String {
        self.run(&[
            "walk-in",
            "--guest",
            guest,
            "--type",
            room_type,
            "--check-out",
            "2099-01-03 1200",
        ])
    }
}
