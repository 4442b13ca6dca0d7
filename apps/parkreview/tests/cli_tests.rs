//! Integration tests for parkreview CLI commands.
//!
//! Uses tempfile for data files and export targets.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use parkreview::cli::{
    ChartKind, cmd_chart, cmd_count, cmd_export, cmd_info, cmd_location_averages, cmd_reviews,
    cmd_year_average, load_dataset,
};
use parkreview::config::Config;
use parkreview_core::{Dataset, LoadPolicy, LoadReport, ReviewError};
use std::path::PathBuf;
use tempfile::TempDir;

const REVIEWS_CSV: &str = "\
Review_ID,Rating,Year_Month,Reviewer_Location,Review_Text,Branch
1,5,2019-4,Australia,Great,Disneyland_HongKong
2,4,2019-4,Australia,Good,Disneyland_HongKong
3,2,2018-12,Canada,Meh,Disneyland_HongKong
4,5,2019-7,United States,Loved it,Disneyland_California
5,3,missing,Canada,Crowded,Disneyland_California
6,1,2019-7,France,Closed rides,Disneyland_Paris
";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn sample() -> (Dataset, LoadReport) {
    Dataset::from_csv_str(REVIEWS_CSV, LoadPolicy::Strict).unwrap()
}

fn write_csv(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("reviews.csv");
    std::fs::write(&path, content).unwrap();
    path
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_load_dataset_from_config_path() {
    let temp = create_temp_dir();
    let config = Config {
        data_path: write_csv(&temp, REVIEWS_CSV),
        ..Config::default()
    };

    let (dataset, report) = load_dataset(&config).unwrap();
    assert_eq!(dataset.len(), 6);
    assert!(report.rejected.is_empty());
}

#[test]
fn test_load_dataset_lenient_skips_bad_rows() {
    let temp = create_temp_dir();
    let csv = format!("{}7,9,2019-1,Peru,Odd,Disneyland_Paris\n", REVIEWS_CSV);
    let config = Config {
        data_path: write_csv(&temp, &csv),
        ..Config::default()
    };

    let (dataset, report) = load_dataset(&config).unwrap();
    assert_eq!(dataset.len(), 6);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 8);
}

#[test]
fn test_load_dataset_strict_fails_on_bad_row() {
    let temp = create_temp_dir();
    let csv = format!("{}7,9,2019-1,Peru,Odd,Disneyland_Paris\n", REVIEWS_CSV);
    let config = Config {
        data_path: write_csv(&temp, &csv),
        strict: true,
        ..Config::default()
    };

    let result = load_dataset(&config);
    assert!(matches!(result, Err(ReviewError::InvalidRecord { line: 8, .. })));
}

#[test]
fn test_load_dataset_missing_file() {
    let temp = create_temp_dir();
    let config = Config {
        data_path: temp.path().join("absent.csv"),
        ..Config::default()
    };
    assert!(load_dataset(&config).is_err());
}

// =============================================================================
// INFO COMMAND TESTS
// =============================================================================

#[test]
fn test_info_json_mode() {
    let (dataset, report) = sample();
    let mut out = Vec::new();
    cmd_info(&dataset, &report, &Config::default(), true, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["total_reviews"], 6);
    assert_eq!(value["rejected_rows"], 0);
    assert_eq!(value["parks"]["Disneyland_HongKong"], 3);
}

#[test]
fn test_info_text_lists_parks() {
    let (dataset, report) = sample();
    let mut out = Vec::new();
    cmd_info(&dataset, &report, &Config::default(), false, &mut out).unwrap();

    let out = text(out);
    assert!(out.contains("Reviews:       6"));
    assert!(out.contains("Disneyland_Paris"));
}

// =============================================================================
// VIEW COMMAND TESTS
// =============================================================================

#[test]
fn test_reviews_with_limit() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_reviews(&dataset, false, &mut out, "california", Some(1)).unwrap();

    let out = text(out);
    assert!(out.contains("Found 2 reviews:"));
    assert!(out.contains("Review #1"));
    assert!(!out.contains("Review #2"));
    assert!(out.contains("... and 1 more reviews."));
}

#[test]
fn test_reviews_missing_date_shown_as_na() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_reviews(&dataset, false, &mut out, "CALIFORNIA", None).unwrap();

    let out = text(out);
    assert!(out.contains("Date: 2019-7"));
    assert!(out.contains("Date: N/A"));
}

#[test]
fn test_reviews_json_mode() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_reviews(&dataset, true, &mut out, "hong", Some(2)).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["total"], 3);
    assert_eq!(value["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(value["reviews"][0]["date"], "2019-4");
}

#[test]
fn test_reviews_blank_park_rejected() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    let result = cmd_reviews(&dataset, false, &mut out, "   ", None);
    assert!(matches!(result, Err(ReviewError::InvalidInput(_))));
}

#[test]
fn test_count() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_count(&dataset, false, &mut out, "hong", "australia").unwrap();
    assert_eq!(
        text(out),
        "\nNumber of reviews for hong from australia: 2\n"
    );
}

#[test]
fn test_year_average() {
    let (dataset, _) = sample();

    let mut out = Vec::new();
    cmd_year_average(&dataset, false, &mut out, "hong", "2019").unwrap();
    assert_eq!(text(out), "\nAverage rating for hong in 2019: 4.50/5\n");

    let mut out = Vec::new();
    cmd_year_average(&dataset, false, &mut out, "hong", "2017").unwrap();
    assert_eq!(text(out), "\nNo reviews found for hong in 2017.\n");
}

#[test]
fn test_year_average_json_mode() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_year_average(&dataset, true, &mut out, "paris", "2019").unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["average_rating"], 1.0);
    assert_eq!(value["review_count"], 1);
}

#[test]
fn test_year_average_rejects_bad_year() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    let result = cmd_year_average(&dataset, false, &mut out, "hong", "19");
    assert!(matches!(result, Err(ReviewError::InvalidInput(_))));
}

#[test]
fn test_location_averages_preview() {
    let (dataset, _) = sample();
    let config = Config {
        location_preview: 1,
        ..Config::default()
    };

    let mut out = Vec::new();
    cmd_location_averages(&dataset, &config, false, &mut out, false).unwrap();
    let out = text(out);
    assert!(out.contains("PARK: Disneyland_HongKong"));
    assert!(out.contains("Australia: 4.50/5"));
    assert!(!out.contains("Canada: 2.00/5"));
    assert!(out.contains("... and 1 more locations."));

    let mut all = Vec::new();
    cmd_location_averages(&dataset, &config, false, &mut all, true).unwrap();
    let all = text(all);
    assert!(all.contains("Canada: 2.00/5"));
    assert!(!all.contains("more locations"));
}

// =============================================================================
// CHART COMMAND TESTS
// =============================================================================

#[test]
fn test_chart_pie() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_chart(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        ChartKind::Pie,
        None,
        Some(20),
    )
    .unwrap();

    let out = text(out);
    assert!(out.starts_with("Distribution of Reviews per Park\n"));
    assert!(out.contains("50.0%"));
}

#[test]
fn test_chart_requires_park() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    let result = cmd_chart(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        ChartKind::Monthly,
        None,
        None,
    );
    assert!(matches!(result, Err(ReviewError::InvalidInput(_))));
}

#[test]
fn test_chart_top_locations() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_chart(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        ChartKind::TopLocations,
        Some("hong"),
        None,
    )
    .unwrap();

    let out = text(out);
    assert!(out.starts_with("Top 2 Locations by Average Rating for hong\n"));
    assert!(out.contains("Australia"));
}

#[test]
fn test_chart_unknown_park() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_chart(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        ChartKind::Monthly,
        Some("tokyo"),
        None,
    )
    .unwrap();
    assert_eq!(text(out), "No data found for park: tokyo\n");
}

#[test]
fn test_chart_monthly_json_has_twelve_months() {
    let (dataset, _) = sample();
    let mut out = Vec::new();
    cmd_chart(
        &dataset,
        &Config::default(),
        true,
        &mut out,
        ChartKind::Monthly,
        Some("california"),
        None,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let months = value.as_object().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months["Jul"], 5.0);
    assert!(months["Jan"].is_null());
}

#[test]
fn test_chart_each_kind_renders_its_own_data() {
    let (dataset, _) = sample();
    let config = Config::default();

    let mut pie = Vec::new();
    cmd_chart(&dataset, &config, true, &mut pie, ChartKind::Pie, Some("hong"), None).unwrap();
    let pie: serde_json::Value = serde_json::from_slice(&pie).unwrap();
    assert_eq!(pie["Disneyland_Paris"], 1);

    let mut top = Vec::new();
    cmd_chart(&dataset, &config, true, &mut top, ChartKind::TopLocations, Some("hong"), None)
        .unwrap();
    let top: serde_json::Value = serde_json::from_slice(&top).unwrap();
    assert_eq!(top[0]["location"], "Australia");
    assert_eq!(top.as_array().unwrap().len(), 2);

    let mut monthly = Vec::new();
    cmd_chart(&dataset, &config, true, &mut monthly, ChartKind::Monthly, Some("hong"), None)
        .unwrap();
    let monthly: serde_json::Value = serde_json::from_slice(&monthly).unwrap();
    assert_eq!(monthly["Apr"], 4.5);
    assert_eq!(monthly["Dec"], 2.0);
}

// =============================================================================
// EXPORT COMMAND TESTS
// =============================================================================

#[test]
fn test_export_json_to_output() {
    let (dataset, _) = sample();
    let temp = create_temp_dir();
    let target = temp.path().join("summary");

    let mut out = Vec::new();
    cmd_export(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        "json",
        Some(&target),
    )
    .unwrap();

    let written = temp.path().join("summary.json");
    assert!(written.exists());
    assert!(text(out).starts_with("Successfully exported to "));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(value["Disneyland_HongKong"]["total_reviews"], 3);
    assert_eq!(value["Disneyland_HongKong"]["positive_reviews"], 2);
    assert_eq!(value["Disneyland_HongKong"]["country_count"], 2);
}

#[test]
fn test_export_uses_config_target() {
    let (dataset, _) = sample();
    let temp = create_temp_dir();
    let config = Config {
        export_dir: temp.path().to_path_buf(),
        ..Config::default()
    };

    let mut out = Vec::new();
    cmd_export(&dataset, &config, false, &mut out, "CSV", None).unwrap();

    let content = std::fs::read_to_string(temp.path().join("park_reviews_summary.csv")).unwrap();
    assert!(content.starts_with("Park Name,Total Reviews,Positive Reviews,Average Rating,Country Count"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_unknown_format() {
    let (dataset, _) = sample();
    let temp = create_temp_dir();
    let mut out = Vec::new();
    let result = cmd_export(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        "xml",
        Some(&temp.path().join("summary")),
    );
    assert!(matches!(result, Err(ReviewError::InvalidInput(_))));
}

#[test]
fn test_export_missing_directory() {
    let (dataset, _) = sample();
    let temp = create_temp_dir();
    let mut out = Vec::new();
    let result = cmd_export(
        &dataset,
        &Config::default(),
        false,
        &mut out,
        "txt",
        Some(&temp.path().join("no_such_dir").join("summary")),
    );
    assert!(result.is_err());
}
