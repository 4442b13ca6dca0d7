//! Integration tests for config resolution from parsed command-line flags.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use parkreview::cli::{Cli, resolve_config};
use parkreview::config::Config;
use parkreview_core::{LoadPolicy, ReviewError};
use std::path::PathBuf;

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("parkreview.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_file_values_are_used() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_config(
        &temp,
        "export_basename = \"weekly\"\ntop_n = 3\nchart_width = 72\n",
    );

    let cli = Cli::try_parse_from([
        "parkreview",
        "--config",
        path.to_str().unwrap(),
        "--data",
        "reviews.csv",
        "info",
    ])
    .unwrap();
    let config = resolve_config(&cli).unwrap();

    assert_eq!(config.export_basename, "weekly");
    assert_eq!(config.top_n, 3);
    assert_eq!(config.chart_width, 72);
    assert_eq!(config.location_preview, Config::default().location_preview);
}

#[test]
fn test_data_flag_and_strict_override_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_config(&temp, "data_path = \"from_file.csv\"\nstrict = false\n");

    let cli = Cli::try_parse_from([
        "parkreview",
        "-c",
        path.to_str().unwrap(),
        "-d",
        "from_flag.csv",
        "--strict",
    ])
    .unwrap();
    let config = resolve_config(&cli).unwrap();

    assert_eq!(config.data_path, PathBuf::from("from_flag.csv"));
    assert_eq!(config.load_policy(), LoadPolicy::Strict);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("nope.toml");

    let cli = Cli::try_parse_from(["parkreview", "--config", missing.to_str().unwrap()]).unwrap();
    assert!(matches!(resolve_config(&cli), Err(ReviewError::Config(_))));
}

#[test]
fn test_invalid_config_reports_path() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_config(&temp, "top_n = \"ten\"\n");

    let err = Config::load_file(&path).unwrap_err();
    assert!(err.to_string().contains("parkreview.toml"));
}
