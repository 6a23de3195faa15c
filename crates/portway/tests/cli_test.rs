//! Integration tests for the `portway` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, and error handling — all without a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `portway` binary with env isolation.
///
/// Clears all `PORTWAY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn portway_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("portway");
    cmd.env("HOME", "/tmp/portway-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/portway-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/portway-cli-test-nonexistent")
        .env_remove("PORTWAY_PROFILE")
        .env_remove("PORTWAY_PORTAL")
        .env_remove("PORTWAY_TOKEN")
        .env_remove("PORTWAY_OUTPUT")
        .env_remove("PORTWAY_INSECURE")
        .env_remove("PORTWAY_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = portway_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_flag_lists_command_groups() {
    portway_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("captive-portal")
            .and(predicate::str::contains("clients"))
            .and(predicate::str::contains("bandwidth"))
            .and(predicate::str::contains("filtering"))
            .and(predicate::str::contains("vouchers")),
    );
}

#[test]
fn version_flag() {
    portway_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("portway"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    portway_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config path (no backend needed) ─────────────────────────────────

#[test]
fn config_path_prints_a_path() {
    portway_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn missing_portal_is_a_clean_error() {
    let output = portway_cmd().args(["clients", "list"]).output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("No portal configured") || text.contains("config init"),
        "Expected configuration guidance in output:\n{text}"
    );
}

#[test]
fn bad_bandwidth_limit_is_a_usage_error() {
    let output = portway_cmd()
        .args([
            "--portal",
            "http://127.0.0.1:9",
            "--token",
            "t",
            "bandwidth",
            "set",
            "someone",
            "turbo",
        ])
        .output()
        .unwrap();
    // Rejected client-side before any request is attempted.
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("limit"), "{text}");
}

#[test]
fn unknown_report_type_is_rejected_at_parse_time() {
    let output = portway_cmd()
        .args(["reports", "generate", "--type", "nonsense"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("unknown report type"), "{text}");
}
