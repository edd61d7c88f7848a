//! Fatal-input integration tests for the ghsum binary.
//!
//! Every case here must fail before any fetch is attempted: the reason goes
//! to stderr, stdout stays empty, and the exit code is non-zero.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn ghsum_binary() -> String {
    env!("CARGO_BIN_EXE_ghsum").to_string()
}

/// Runs ghsum against a throwaway HOME with credential variables scrubbed.
fn run_scrubbed(home: &Path, args: &[&str]) -> Output {
    Command::new(ghsum_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GHSUM_TOKEN")
        .env_remove("GHSUM_API_URL")
        .args(args)
        .output()
        .expect("failed to run ghsum")
}

#[test]
fn end_date_before_start_date_is_fatal() {
    let temp = TempDir::new().unwrap();
    let output = run_scrubbed(
        temp.path(),
        &[
            "--user",
            "octocat",
            "--start-date",
            "2024-01-03",
            "--end-date",
            "2024-01-01",
        ],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no report should be produced");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("start date cannot be after end date"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn summary_flag_requires_markdown_output() {
    let temp = TempDir::new().unwrap();
    let output = run_scrubbed(
        temp.path(),
        &["--user", "octocat", "--start-date", "2024-01-03", "--summary"],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no report should be produced");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--summary is only valid with markdown output"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn malformed_start_date_is_rejected() {
    let temp = TempDir::new().unwrap();
    let output = run_scrubbed(
        temp.path(),
        &["--user", "octocat", "--start-date", "2024-13-01"],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no report should be produced");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--start-date"),
        "clap should name the offending flag: {stderr}"
    );
}

#[test]
fn missing_token_is_fatal_before_any_fetch() {
    let temp = TempDir::new().unwrap();
    let output = run_scrubbed(
        temp.path(),
        &["--user", "octocat", "--start-date", "2024-01-03"],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no report should be produced");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GITHUB_TOKEN environment variable not set"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn range_check_runs_before_the_credential_check() {
    // Both problems present; the range error must win.
    let temp = TempDir::new().unwrap();
    let output = run_scrubbed(
        temp.path(),
        &[
            "--user",
            "octocat",
            "--start-date",
            "2024-01-03",
            "--end-date",
            "2024-01-01",
        ],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("start date cannot be after end date"));
    assert!(!stderr.contains("GITHUB_TOKEN"));
}
