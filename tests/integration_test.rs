//! Integration tests for the ledger analyzer CLI.
//!
//! These tests run the actual binary inside a temporary working directory
//! and check both the console summary and the JSON artifact.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get absolute path to a test data file
fn test_data_path(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(filename)
}

/// Command for the binary, running in `dir`
fn analyzer_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger-analyzer").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

/// Run the binary on `input`, writing the default artifact into `dir`
fn run_analyzer(dir: &TempDir, input: &Path) -> String {
    let assert = analyzer_in(dir).arg(input).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn read_artifact(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_sample_ledger_summary() {
    let dir = TempDir::new().unwrap();
    let output = run_analyzer(&dir, &test_data_path("sample_ledger.csv"));

    assert!(output.starts_with(
        "Total Deposited: 1600.25\n\
         Total Withdrawn: 1250.50\n\
         Net Result: -349.75\n\
         Total Transactions: 6\n\
         Best Month: 2023-03 (1100.25)\n\
         Worst Month: 2023-01 (-950.00)\n"
    ));
}

#[test]
fn test_sample_ledger_artifact() {
    let dir = TempDir::new().unwrap();
    run_analyzer(&dir, &test_data_path("sample_ledger.csv"));

    let json = read_artifact(&dir.path().join("transaction_analysis.json"));
    assert_eq!(json["transaction_count"], 6);
    assert_eq!(json["net_result"], -349.75);
    assert_eq!(json["best_month"][0], "2023-03");
    assert_eq!(json["monthly_data"]["2023-03"]["withdrawal"], 1200.5);
    assert_eq!(json["monthly_data"]["2023-03"]["deposit"], 100.25);

    let transactions = json["transactions"].as_array().unwrap();
    let dates: Vec<&str> = transactions
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2023-01-05", "2023-01-20", "2023-02-01", "2023-03-10", "2023-03-11", "2023-03-15"]
    );
    assert_eq!(transactions[4]["type"], "Transfer");
    assert_eq!(transactions[4]["cumulative_net"], -249.5);
    assert_eq!(transactions[5]["cumulative_net"], json["net_result"]);
}

#[test]
fn test_custom_output_path() {
    let dir = TempDir::new().unwrap();
    analyzer_in(&dir)
        .arg(test_data_path("sample_ledger.csv"))
        .arg("report.json")
        .assert()
        .success();

    assert!(dir.path().join("report.json").exists());
    assert!(!dir.path().join("transaction_analysis.json").exists());
}

#[test]
fn test_default_input_path() {
    let dir = TempDir::new().unwrap();
    fs::copy(
        test_data_path("sample_ledger.csv"),
        dir.path().join("transactions.csv"),
    )
    .unwrap();

    analyzer_in(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Transactions: 6"));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let artifact = dir.path().join("transaction_analysis.json");

    run_analyzer(&dir, &test_data_path("sample_ledger.csv"));
    let first = fs::read(&artifact).unwrap();
    run_analyzer(&dir, &test_data_path("sample_ledger.csv"));
    let second = fs::read(&artifact).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_header_only_ledger() {
    let dir = TempDir::new().unwrap();
    let output = run_analyzer(&dir, &test_data_path("header_only.csv"));

    assert!(output.contains("Total Deposited: 0.00"));
    assert!(output.contains("Total Transactions: 0"));
    assert!(!output.contains("Best Month"));

    let json = read_artifact(&dir.path().join("transaction_analysis.json"));
    assert!(json["best_month"].is_null());
    assert!(json["worst_month"].is_null());
}

#[test]
fn test_thousands_separator_fails_without_artifact() {
    let dir = TempDir::new().unwrap();
    analyzer_in(&dir)
        .arg(test_data_path("thousands_separator.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record at row 2"))
        .stderr(predicate::str::contains("1.234,56"));

    assert!(!dir.path().join("transaction_analysis.json").exists());
}

#[test]
fn test_missing_file_error() {
    let dir = TempDir::new().unwrap();
    analyzer_in(&dir)
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_unwritable_output_error() {
    let dir = TempDir::new().unwrap();
    analyzer_in(&dir)
        .arg(test_data_path("sample_ledger.csv"))
        .arg("missing-dir/out.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write output"));
}

#[test]
fn test_too_many_arguments_error() {
    let dir = TempDir::new().unwrap();
    analyzer_in(&dir)
        .args(["a.csv", "b.json", "c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_money_has_two_decimal_places() {
    let dir = TempDir::new().unwrap();
    let output = run_analyzer(&dir, &test_data_path("sample_ledger.csv"));

    for line in output.lines().take(3) {
        let value = line.rsplit(' ').next().unwrap();
        let dot = value.find('.').expect("decimal point");
        assert_eq!(value.len() - dot - 1, 2, "Expected 2 decimal places in: {}", line);
    }
}
