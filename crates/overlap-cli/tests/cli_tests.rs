//! Integration tests for the `overlap` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the windows, coverage,
//! and recommend subcommands through the actual binary, including stdin
//! piping, file output, RSVP filtering, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn availability_json() -> String {
    std::fs::read_to_string(fixture("availability.json")).expect("availability.json fixture must exist")
}

/// Run `overlap` with `args` and parse stdout as a JSON array.
fn run_json(args: &[&str]) -> Vec<Value> {
    let output = Command::cargo_bin("overlap")
        .unwrap()
        .args(args)
        .output()
        .expect("failed to run overlap");
    assert!(
        output.status.success(),
        "overlap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout must be JSON");
    value.as_array().expect("stdout must be a JSON array").clone()
}

fn window_bounds(window: &Value) -> (&str, &str) {
    (
        window["start"].as_str().unwrap(),
        window["end"].as_str().unwrap(),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// windows
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn windows_from_file() {
    let windows = run_json(&["windows", "-i", &fixture("availability.json")]);

    assert_eq!(windows.len(), 2);
    assert_eq!(
        window_bounds(&windows[0]),
        ("2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z")
    );
    assert_eq!(
        window_bounds(&windows[1]),
        ("2026-03-16T15:00:00Z", "2026-03-16T16:00:00Z")
    );
    assert_eq!(windows[0]["participant_count"], 3);
    assert_eq!(windows[0]["participants"][0]["id"], "alice");
    assert_eq!(windows[0]["participants"][1]["id"], "bob");
    assert_eq!(windows[0]["participants"][2]["kind"], "guest");
}

#[test]
fn windows_from_stdin() {
    Command::cargo_bin("overlap")
        .unwrap()
        .arg("windows")
        .write_stdin(availability_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-16T10:00:00Z"))
        .stdout(predicate::str::contains("\"participant_count\":3"));
}

#[test]
fn windows_with_rsvps_drop_declined_participants() {
    let windows = run_json(&[
        "windows",
        "-i",
        &fixture("availability.json"),
        "--rsvps",
        &fixture("rsvps.json"),
    ]);

    assert_eq!(windows.len(), 2);
    for window in &windows {
        assert_eq!(window["participant_count"], 2);
        assert!(!window.to_string().contains("bob"));
    }
}

#[test]
fn windows_everyone_counts_participants_without_slots() {
    // carol submitted no slots, so no window works for all four.
    let windows = run_json(&["windows", "-i", &fixture("availability.json"), "--everyone"]);
    assert!(windows.is_empty());

    // With RSVPs only alice and the guest are expected, and both windows fit.
    let windows = run_json(&[
        "windows",
        "-i",
        &fixture("availability.json"),
        "--rsvps",
        &fixture("rsvps.json"),
        "--everyone",
    ]);
    assert_eq!(windows.len(), 2);
}

#[test]
fn windows_to_output_file() {
    let output_path = std::env::temp_dir().join("overlap-test-windows-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["windows", "-i", &fixture("availability.json"), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Invalid input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inverted_slots_are_skipped_by_default() {
    let windows = run_json(&["windows", "-i", &fixture("inverted.json")]);

    assert_eq!(windows.len(), 1);
    assert_eq!(
        window_bounds(&windows[0]),
        ("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z")
    );
}

#[test]
fn strict_mode_fails_on_inverted_slots() {
    Command::cargo_bin("overlap")
        .unwrap()
        .args(["windows", "--strict", "-i", &fixture("inverted.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rejected interval for user:alice"));
}

#[test]
fn malformed_json_fails() {
    Command::cargo_bin("overlap")
        .unwrap()
        .arg("windows")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse availability rows"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("overlap")
        .unwrap()
        .args(["windows", "-i", "/nonexistent/availability.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// coverage and recommend
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn coverage_reports_every_segment() {
    let windows = run_json(&["coverage", "-i", &fixture("availability.json")]);

    let counts: Vec<u64> = windows
        .iter()
        .map(|w| w["participant_count"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![1, 2, 3, 2, 1, 2, 3, 2, 1]);
}

#[test]
fn coverage_min_participants_filters() {
    let windows = run_json(&[
        "coverage",
        "-i",
        &fixture("availability.json"),
        "--min-participants",
        "3",
    ]);

    assert_eq!(windows.len(), 2);
    assert_eq!(
        window_bounds(&windows[1]),
        ("2026-03-16T15:00:00Z", "2026-03-16T16:00:00Z")
    );
}

#[test]
fn recommend_ranks_best_coverage_first() {
    let windows = run_json(&[
        "recommend",
        "-i",
        &fixture("availability.json"),
        "--coverage",
        "--limit",
        "2",
    ]);

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["participant_count"], 3);
    assert_eq!(
        window_bounds(&windows[0]),
        ("2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z")
    );
    assert_eq!(
        window_bounds(&windows[1]),
        ("2026-03-16T15:00:00Z", "2026-03-16T16:00:00Z")
    );
}

#[test]
fn recommend_min_minutes_drops_short_windows() {
    let windows = run_json(&[
        "recommend",
        "-i",
        &fixture("availability.json"),
        "--min-minutes",
        "90",
    ]);

    assert!(windows.is_empty());
}

#[test]
fn no_subcommand_shows_usage() {
    Command::cargo_bin("overlap")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
