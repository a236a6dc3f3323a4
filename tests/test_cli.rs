//! Tests for CLI argument parsing and the binary's query surface

use assert_cmd::Command;
use churnscope::cli::Cli;
use clap::Parser;
use predicates::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["churnscope", "-i", "churn.csv"]);

    assert_eq!(cli.seed, 42, "Default seed should be 42");
    assert_eq!(cli.trees, 100, "Default tree count should be 100");
    assert_eq!(cli.max_depth, 16, "Default max depth should be 16");
    assert!(!cli.stats);
    assert!(cli.customer_id.is_none());
    assert!(!cli.is_one_shot(), "Defaults should start a session");
}

#[test]
fn test_cli_one_shot_detection() {
    let cli = Cli::parse_from(["churnscope", "-i", "churn.csv", "-c", "15634602"]);
    assert!(cli.is_one_shot());

    let cli = Cli::parse_from(["churnscope", "-i", "churn.csv", "--stats"]);
    assert!(cli.is_one_shot());
}

#[test]
fn test_cli_rejects_export_with_both_queries() {
    let cli = Cli::parse_from([
        "churnscope",
        "-i",
        "churn.csv",
        "-c",
        "15634602",
        "--stats",
        "--export",
        "out.json",
    ]);
    assert!(cli.validate().is_err());

    // Each query alone may be exported.
    let cli = Cli::parse_from([
        "churnscope", "-i", "churn.csv", "--stats", "--export", "out.json",
    ]);
    assert!(cli.validate().is_ok());

    // Both queries without an export path are fine.
    let cli = Cli::parse_from(["churnscope", "-i", "churn.csv", "-c", "15634602", "--stats"]);
    assert!(cli.validate().is_ok());
}

#[test]
fn test_binary_rejects_export_with_both_queries() {
    Command::cargo_bin("churnscope")
        .unwrap()
        .args([
            "-i",
            "churn.csv",
            "-c",
            "15634602",
            "--stats",
            "--export",
            "out.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--export"));
}

#[test]
fn test_cli_rejects_zero_trees() {
    let result = Cli::try_parse_from(["churnscope", "-i", "churn.csv", "--trees", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_binary_reports_missing_file() {
    Command::cargo_bin("churnscope")
        .unwrap()
        .args(["-i", "/nonexistent/churn.csv", "--stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data source error"));
}

#[test]
fn test_binary_stats_one_shot() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 60);

    Command::cargo_bin("churnscope")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--stats", "--trees", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Churned"))
        .stdout(predicate::str::contains("Retained"));
}

#[test]
fn test_binary_predict_one_shot() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 60);
    let id = common::FIRST_CUSTOMER_ID.to_string();

    Command::cargo_bin("churnscope")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "-c", &id, "--trees", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Churn probability"))
        .stdout(predicate::str::contains("Recommended actions"));
}

#[test]
fn test_binary_rejects_non_numeric_id() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 40);

    Command::cargo_bin("churnscope")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "-c", "abc", "--trees", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid customer id"));
}

#[test]
fn test_binary_reports_unknown_customer() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 40);

    Command::cargo_bin("churnscope")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "-c", "12345", "--trees", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_binary_fails_before_queries_without_label_column() {
    let dir = TempDir::new().unwrap();
    let path = common::write_unlabeled_churn_csv(&dir, 40);

    Command::cargo_bin("churnscope")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--stats", "--trees", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("training error"));
}

#[test]
fn test_binary_exports_stats_json() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 50);
    let export = dir.path().join("summary.json");

    Command::cargo_bin("churnscope")
        .unwrap()
        .args([
            "-i",
            path.to_str().unwrap(),
            "--stats",
            "--trees",
            "5",
            "--export",
            export.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(&export).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["total"].as_u64().unwrap() > 0);
}
