// Integration tests for the awards-pool CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// argument parsing, exit codes, and stderr output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the awards-pool binary.
fn awards_pool() -> Command {
    Command::cargo_bin("awards-pool").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    awards_pool()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("awards-pool"));
}

#[test]
fn cli_help_flag() {
    awards_pool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("prediction pool"));
}

#[test]
fn scoreboard_requires_path() {
    awards_pool()
        .arg("scoreboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn set_winner_requires_identity() {
    awards_pool()
        .args(["set-winner", "/tmp/pool", "--category", "c1", "--nominee", "n1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--as"));
}

#[test]
fn verbose_and_quiet_conflict() {
    awards_pool()
        .args(["-v", "-q", "winners", "/tmp/pool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_pool_directory_is_runtime_failure() {
    awards_pool()
        .args(["winners", "/definitely/not/a/pool/dir"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}
