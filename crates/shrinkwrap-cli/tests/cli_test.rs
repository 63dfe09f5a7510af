// ShrinkWrap - Compression Advisor and Transform Simulator
// Copyright (C) 2025 ShrinkWrap Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! CLI tests for the `shrinkwrap` binary
//!
//! Every command runs with simulated latency turned off and no suggestion
//! endpoint, so suggestions come from the fallback rule.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a shrinkwrap command with a quiet, offline environment
#[allow(deprecated)]
fn shrinkwrap() -> Command {
    let mut cmd = Command::cargo_bin("shrinkwrap").unwrap();
    cmd.env("SHRINKWRAP_SIMULATOR_LATENCY_MS", "0")
        .env("SHRINKWRAP_SIMULATOR_JITTER_MS", "0")
        .env("SHRINKWRAP_ADVISOR_ENDPOINT", "")
        .env("SHRINKWRAP_MAIL_RELAY_URL", "")
        .env("SHRINKWRAP_MAIL_FROM", "")
        .env_remove("SHRINKWRAP_LOG_LEVEL")
        .env_remove("SHRINKWRAP_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

// ============================================================================
// Catalog and inspection
// ============================================================================

#[test]
fn test_algorithms_lists_catalog() {
    shrinkwrap()
        .arg("algorithms")
        .assert()
        .success()
        .stdout(predicate::str::contains("rle"))
        .stdout(predicate::str::contains("Run-Length Encoding"))
        .stdout(predicate::str::contains("pdf-optimization"));
}

#[test]
fn test_algorithms_json() {
    let output = shrinkwrap().args(["algorithms", "--json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["huffman", "rle", "lz77", "deflate", "pdf-optimization"]);
}

#[test]
fn test_inspect_artifact() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.pdf.deflate.shrnk");
    fs::write(&path, [1u8; 64]).unwrap();

    let output = shrinkwrap()
        .args(["inspect", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["is_artifact"], true);
    assert_eq!(report["detected_algorithm"], "deflate");
    assert_eq!(report["available"], "decompression");
    assert_eq!(report["output_name"], "report.pdf");
    assert_eq!(report["size"], 64);
}

#[test]
fn test_inspect_plain_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    fs::write(&path, "hello").unwrap();

    shrinkwrap()
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("compression"));
}

#[test]
fn test_inspect_missing_file() {
    let temp = TempDir::new().unwrap();

    shrinkwrap()
        .arg("inspect")
        .arg(temp.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn test_suggest_offline_uses_fallback() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("photo.png");
    fs::write(&path, [0u8; 32]).unwrap();

    let output = shrinkwrap()
        .args(["suggest", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["suggestion"], "Run-Length Encoding");
    assert_eq!(report["algorithm"], "rle");
    assert_eq!(report["fallback"], true);
}

#[test]
fn test_suggest_warns_about_fallback() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.csv");
    fs::write(&path, "a,b\n1,2\n").unwrap();

    shrinkwrap()
        .arg("suggest")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("AI Suggestion Failed"))
        .stdout(predicate::str::contains("DEFLATE"));
}

// ============================================================================
// Compress / decompress
// ============================================================================

#[test]
fn test_compress_with_explicit_algorithm() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("photo.png");
    fs::write(&input, vec![7u8; 1000]).unwrap();
    let out = temp.path().join("out");

    shrinkwrap()
        .args(["compress", "--algorithm", "rle", "--out"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("photo.png.rle.shrnk"))
        .stdout(predicate::str::contains("40.00% smaller"))
        .stdout(predicate::str::contains("File compressed as photo.png.rle.shrnk."));

    let written = fs::read(out.join("photo.png.rle.shrnk")).unwrap();
    assert_eq!(written.len(), 600);
}

#[test]
fn test_compress_uses_fallback_suggestion() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("scan.pdf");
    fs::write(&input, vec![1u8; 100]).unwrap();

    shrinkwrap()
        .args(["compress", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .success();

    assert!(temp.path().join("scan.pdf.pdf-optimization.shrnk").exists());
}

#[test]
fn test_compress_without_suggestion_uses_default() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "abcdefghij").unwrap();

    shrinkwrap()
        .args(["-q", "compress", "--no-suggest", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("notes.txt.deflate.shrnk").exists());
}

#[test]
fn test_compress_rejects_unknown_algorithm() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "abc").unwrap();

    shrinkwrap()
        .args(["compress", "--algorithm", "zip"])
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn test_decompress_artifact_restores_name() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("report.pdf.deflate.shrnk");
    fs::write(&input, vec![3u8; 400]).unwrap();

    shrinkwrap()
        .args(["decompress", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Compressed File Detected"));

    let restored = fs::read(temp.path().join("report.pdf")).unwrap();
    assert_eq!(restored.len(), 1000);
}

#[test]
fn test_compressing_an_artifact_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.txt.lz77.shrnk");
    fs::write(&input, "abc").unwrap();

    shrinkwrap()
        .args(["compress", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("compression is not available"));
}

#[test]
fn test_decompressing_a_plain_file_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "abc").unwrap();

    shrinkwrap()
        .args(["decompress", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("decompression is not available"));
}

#[test]
fn test_missing_input_reports_read_error() {
    let temp = TempDir::new().unwrap();

    shrinkwrap()
        .arg("compress")
        .arg(temp.path().join("absent.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File Read Error"));
}

#[test]
fn test_failure_is_reported_once() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "abc").unwrap();

    shrinkwrap()
        .args(["decompress", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("not available").not())
        .stderr(predicate::function(|err: &str| {
            err.matches("decompression is not available").count() == 1
        }));
}

// ============================================================================
// Mail
// ============================================================================

#[test]
fn test_email_without_relay_is_reported() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "hello").unwrap();

    shrinkwrap()
        .args(["compress", "--no-suggest", "--email", "user@example.com", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Server is not configured for sending emails"));

    // the download still happened
    assert!(temp.path().join("notes.txt.deflate.shrnk").exists());
}

#[test]
fn test_email_with_invalid_address() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "hello").unwrap();

    shrinkwrap()
        .args(["compress", "--no-suggest", "--email", "not-an-address", "--out"])
        .arg(temp.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid email address."));
}

// ============================================================================
// Configuration and misc
// ============================================================================

#[test]
fn test_config_file_sets_output_dir() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("results");
    let config = temp.path().join("shrinkwrap.toml");
    fs::write(
        &config,
        format!("[app]\noutput_dir = {:?}\n", out.to_str().unwrap()),
    )
    .unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "hello world").unwrap();

    shrinkwrap()
        .arg("--config")
        .arg(&config)
        .args(["compress", "--algorithm", "lz77"])
        .arg(&input)
        .assert()
        .success();

    assert!(out.join("notes.txt.lz77.shrnk").exists());
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("shrinkwrap.json");
    fs::write(&config, r#"{"simulator": {"expansion_cap": 0.5}}"#).unwrap();

    shrinkwrap()
        .arg("--config")
        .arg(&config)
        .arg("algorithms")
        .assert()
        .failure()
        .stderr(predicate::str::contains("simulator.expansion_cap"));
}

#[test]
fn test_version() {
    shrinkwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shrinkwrap"));
}

#[test]
fn test_completions() {
    shrinkwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shrinkwrap"));
}
