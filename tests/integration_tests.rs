//! Integration tests for the parscan CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Run the binary from an empty directory so no stray parscan.toml is picked up
fn parscan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("parscan").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("PARSCAN_SEARCH__FANOUT")
        .env_remove("PARSCAN_BENCH__WINDOWS")
        .env_remove("RUST_LOG");
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bench").and(predicate::str::contains("Usage")));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parscan"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test a small benchmark run prints one line per variant
#[test]
fn test_bench_text_output() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .args(["bench", "--size", "20000", "--trials", "2", "--fanout", "4"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Executing Sequential find 2 times took")
                .and(predicate::str::contains("Parallel find (4 x threads)"))
                .and(predicate::str::contains("Rayon parallel find")),
        );
}

/// Test JSON output carries the parameters and every result
#[test]
fn test_bench_json_output() {
    let dir = TempDir::new().unwrap();
    let assert = parscan(&dir)
        .args([
            "bench", "--size", "5000", "--trials", "1", "--target", "absent", "--executor", "pool", "--sort",
            "--format", "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let run: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(run["parameters"]["size"], 5000);
    assert_eq!(run["parameters"]["needle"], -1);
    assert_eq!(run["parameters"]["expected"], 5000);
    assert_eq!(run["parameters"]["executor"], "pool");

    let results = run["results"].as_array().unwrap();
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r["status"] == "measured"));
}

/// Test settings from a repository config file are applied
#[test]
fn test_bench_uses_repo_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("parscan.toml"),
        "[search]\nfanout = 3\n\n[bench]\nsize = 3000\ntrials = 1\n",
    )
    .unwrap();

    parscan(&dir)
        .arg("bench")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parallel find (3 x threads)"));
}

/// Test configuration show and validate
#[test]
fn test_config_operations() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fanout = 4"));

    parscan(&dir)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"executor\": \"threads\""));

    parscan(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

/// Test an invalid custom config is rejected
#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "[search]\nfanout = 0\n").unwrap();

    parscan(&dir)
        .args(["config", "validate", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fanout"));

    parscan(&dir)
        .args(["config", "validate", "--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

/// Test environment variables override the defaults
#[test]
fn test_env_override() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .env("PARSCAN_SEARCH__FANOUT", "7")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fanout = 7"));
}

/// Test an absurd fanout fails cleanly instead of crashing
#[test]
fn test_bench_rejects_oversized_fanout() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .args(["bench", "--size", "100", "--fanout", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fanout must be between 1 and").and(predicate::str::contains("panicked").not()));
}

/// Test a mistyped --config path is reported instead of running on defaults
#[test]
fn test_missing_config_file_rejected_by_every_command() {
    let dir = TempDir::new().unwrap();
    parscan(&dir)
        .args(["bench", "--size", "100", "--config", "typo.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found: typo.toml"));

    parscan(&dir)
        .args(["config", "show", "--config", "typo.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

/// Test a single section or key can be shown
#[test]
fn test_config_show_section() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("parscan.toml"), "[bench]\ntrials = 9\n").unwrap();

    parscan(&dir)
        .args(["config", "show", "bench"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trials = 9").and(predicate::str::contains("fanout").not()));

    parscan(&dir)
        .args(["config", "show", "search.executor", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"threads\""));

    parscan(&dir)
        .args(["config", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

/// Test --windows adds a spread summary to every find measurement
#[test]
fn test_bench_windows_report_spread() {
    let dir = TempDir::new().unwrap();
    let assert = parscan(&dir)
        .args(["bench", "--size", "3000", "--trials", "1", "--windows", "3", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let run: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(run["parameters"]["windows"], 3);

    let results = run["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    for result in results {
        assert_eq!(result["status"], "measured");
        assert_eq!(result["spread"]["samples"], 3);
    }

    parscan(&dir)
        .args(["bench", "--size", "3000", "--trials", "1", "-w", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 windows: mean"));
}

