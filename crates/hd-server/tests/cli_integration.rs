//! CLI integration tests
//!
//! Tests the hostdeck binary's argument handling using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn hostdeck() -> Command {
    Command::cargo_bin("hostdeck")
        .expect("Failed to locate hostdeck binary - ensure it's built before running tests")
}

#[test]
fn test_cli_help() {
    hostdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostdeck"))
        .stdout(predicate::str::contains("Web launcher"));
}

#[test]
fn test_cli_help_lists_environment() {
    hostdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("HOST_IP"))
        .stdout(predicate::str::contains("HOST_SSH_PORT"))
        .stdout(predicate::str::contains("SECRET_KEY"));
}

#[test]
fn test_cli_help_hides_password_value() {
    hostdeck()
        .env("HOST_PASSWORD", "hunter2")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_cli_version() {
    hostdeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostdeck"));
}

#[test]
fn test_cli_rejects_invalid_port() {
    hostdeck()
        .args(["--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}

#[test]
fn test_cli_rejects_invalid_bind_address() {
    hostdeck()
        .args(["--bind", "nowhere"])
        .env_remove("RUST_LOG")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid server configuration"));
}
