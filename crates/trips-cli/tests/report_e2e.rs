//! End-to-end tests for the trips binary.
//!
//! Each test runs the compiled binary against a small export file written
//! into a temp directory and asserts on exit status, console output, and
//! the CSV artifact.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn trips_binary() -> String {
    env!("CARGO_BIN_EXE_trips").to_string()
}

/// Runs the binary with HOME pointed at the temp directory so no real user
/// configuration leaks into the test.
fn run_in(temp: &Path, args: &[&str]) -> Output {
    Command::new(trips_binary())
        .current_dir(temp)
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join("config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run trips")
}

fn write_export(temp: &Path, name: &str, json: &str) -> String {
    let path = temp.join(name);
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

const BOUNDED_EXPORT: &str = r#"{"timelineObjects": [
  {"placeVisit": {
    "duration": {"startTimestamp": "2022-02-04T08:00:00+01:00",
                 "endTimestamp": "2022-02-04T09:55:00+01:00"},
    "location": {"address": "1 Main St\nSpringfield"}}},
  {"activitySegment": {
    "duration": {"startTimestamp": "2022-02-04T10:00:00.000+01:00",
                 "endTimestamp": "2022-02-04T10:30:00+01:00"},
    "activityType": "IN_PASSENGER_VEHICLE",
    "distance": 5000}},
  {"placeVisit": {
    "duration": {"startTimestamp": "2022-02-04T10:31:00+01:00",
                 "endTimestamp": "2022-02-04T12:00:00+01:00"},
    "location": {"address": "2 Oak Ave"}}},
  {"placeVisit": {
    "duration": {"startTimestamp": "2022-02-04T12:05:00+01:00",
                 "endTimestamp": "2022-02-04T13:00:00+01:00"},
    "location": {"address": "3 Pine Rd"}}}
]}"#;

#[test]
fn bounded_policy_writes_csv_and_console_line() {
    let temp = TempDir::new().unwrap();
    let file = write_export(temp.path(), "export.json", BOUNDED_EXPORT);

    let output = run_in(
        temp.path(),
        &[&file, "--policy", "bounded", "--utc-offset", "+01:00"],
    );
    assert!(
        output.status.success(),
        "trips should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Trip: 1 Main St Springfield -> 2 Oak Ave"),
        "unexpected stdout: {stdout}"
    );

    let csv = std::fs::read_to_string(temp.path().join("output.csv")).unwrap();
    assert_eq!(
        csv,
        "\"1 Main St Springfield\",\"2 Oak Ave\",04/02/2022 10:00:00,04/02/2022 10:30:00,5\n"
    );
}

#[test]
fn output_flag_redirects_the_csv() {
    let temp = TempDir::new().unwrap();
    let file = write_export(temp.path(), "export.json", BOUNDED_EXPORT);
    let custom = temp.path().join("trips.csv");

    let output = run_in(
        temp.path(),
        &[
            &file,
            "--utc-offset",
            "+01:00",
            "--output",
            custom.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    assert!(custom.exists());
    assert!(!temp.path().join("output.csv").exists());
}

#[test]
fn date_policy_echoes_visit_and_writes_no_csv() {
    let temp = TempDir::new().unwrap();
    let file = write_export(temp.path(), "export.json", BOUNDED_EXPORT);

    let output = run_in(
        temp.path(),
        &[
            &file,
            "--policy",
            "date-example",
            "--date",
            "2022-02-04",
            "--utc-offset",
            "+01:00",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Activity: IN_PASSENGER_VEHICLE from 04/02/2022 10:00:00"),
        "unexpected stdout: {stdout}"
    );
    assert!(
        stdout.contains("Visit: 2 Oak Ave"),
        "unexpected stdout: {stdout}"
    );
    assert!(
        !temp.path().join("output.csv").exists(),
        "date policy must not produce a CSV artifact"
    );
}

#[test]
fn date_policy_off_date_is_silent() {
    let temp = TempDir::new().unwrap();
    let file = write_export(temp.path(), "export.json", BOUNDED_EXPORT);

    let output = run_in(
        temp.path(),
        &[
            &file,
            "--policy",
            "date-example",
            "--date",
            "2023-01-01",
            "--utc-offset",
            "+01:00",
        ],
    );
    assert!(output.status.success());
    assert!(
        output.stdout.is_empty(),
        "off-date run should print nothing: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn missing_argument_exits_one() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_file_exits_two() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["no-such-export.json"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn unknown_entry_kind_exits_three() {
    let temp = TempDir::new().unwrap();
    let file = write_export(
        temp.path(),
        "export.json",
        r#"{"timelineObjects": [{"mysteryBlob": {"anything": 1}}]}"#,
    );

    let output = run_in(temp.path(), &[&file, "--utc-offset", "+01:00"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mysteryBlob"), "stderr: {stderr}");
    assert!(
        !temp.path().join("output.csv").exists(),
        "no records may be emitted after a classification failure"
    );
}
