//! Integration tests for the roombook CLI.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

fn roombook() -> Command {
    Command::cargo_bin("roombook").expect("Failed to find roombook binary")
}

/// Test that the binary runs without arguments and displays usage.
#[test]
fn test_cli_no_arguments() {
    roombook()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    roombook()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roombook"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag lists the subcommands.
#[test]
fn test_cli_help_flag() {
    roombook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Manage room reservations"))
        .stdout(predicate::str::contains("approve"))
        .stdout(predicate::str::contains("check-availability"));
}

/// Test that an invalid subcommand produces an error.
#[test]
fn test_cli_invalid_subcommand() {
    roombook()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

/// Test that subcommand help mentions its arguments.
#[test]
fn test_create_help_lists_fields() {
    roombook()
        .args(["create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--user"))
        .stdout(predicate::str::contains("--room"))
        .stdout(predicate::str::contains("--start"))
        .stdout(predicate::str::contains("--end"));
}

/// Test that completions are generated for bash.
#[test]
fn test_completions_bash() {
    roombook()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roombook"))
        .stdout(predicate::str::contains("check-availability"));
}
