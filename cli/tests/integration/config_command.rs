//! Integration tests for `waypoint config` command.
//!
//! All filesystem-touching tests set `WAYPOINT_CONFIG` to a temp path so they
//! never read or write `~/.waypoint/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn waypoint() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("waypoint"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    waypoint()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let (_dir, path) = temp_config_path();
    waypoint()
        .args(["config", "show"])
        .env("WAYPOINT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("wait.login"))
        .stdout(predicate::str::contains("5m"))
        .stdout(predicate::str::contains("default (node-address)"));
}

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    waypoint()
        .args(["config", "set", "wait.interval", "250ms"])
        .env("WAYPOINT_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set wait.interval = 250ms"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("250ms"), "{content}");
}

#[test]
fn test_config_set_then_show_json() {
    let (_dir, path) = temp_config_path();
    waypoint()
        .args(["config", "set", "protocol", "winrm"])
        .env("WAYPOINT_CONFIG", &path)
        .assert()
        .success();

    let output = waypoint()
        .args(["config", "show", "--json"])
        .env("WAYPOINT_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["settings"]["protocol"], "winrm");
    assert_eq!(v["path"], path.as_str());
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    waypoint()
        .args(["config", "set", "security.level", "strict"])
        .env("WAYPOINT_CONFIG", &path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_zero_interval_fails_as_json() {
    let (_dir, path) = temp_config_path();
    let output = waypoint()
        .args(["config", "set", "wait.interval", "0s", "--json"])
        .env("WAYPOINT_CONFIG", &path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "configuration");
}
