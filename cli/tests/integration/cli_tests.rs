//! Integration tests for the CLI skeleton: help, version, global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn waypoint() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("waypoint"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    waypoint().assert().code(2).stderr(predicate::str::contains(
        "Resolve provisioned cloud nodes into connectable machine handles",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    waypoint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("candidates"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    waypoint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("waypoint"));
}

#[test]
fn test_version_command_shows_version() {
    waypoint()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("waypoint 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = waypoint()
        .args(["version", "--json"])
        .output()
        .expect("run waypoint");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["version"], "0.1.0");
}

#[test]
fn test_resolve_help_documents_wait_flag() {
    waypoint()
        .args(["resolve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--wait"))
        .stdout(predicate::str::contains("--port-forwarding"))
        .stdout(predicate::str::contains("--hostname-policy"));
}

#[test]
fn test_unknown_protocol_is_rejected_by_parser() {
    waypoint()
        .args(["resolve", "node.json", "--protocol", "telnet"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("telnet"));
}

#[test]
fn test_cli_accepts_any_no_color_value() {
    for value in ["1", "yes", ""] {
        Command::new(assert_cmd::cargo::cargo_bin!("waypoint"))
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("waypoint"))
            .stdout(predicate::str::contains("\x1b[").not());
    }
}
