//! # Export Module
//!
//! Writes per-park aggregate statistics ([`ParkSummary`]) to files.
//!
//! The [`Exporter`] trait is the single seam: each format implements
//! [`Exporter::render`] and inherits [`Exporter::export`], which fixes the
//! file extension, checks the target directory and writes the bytes.
//!
//! | Format | Exporter        | Layout                                   |
//! |--------|-----------------|------------------------------------------|
//! | TXT    | [`TxtExporter`] | human-readable report, one block per park |
//! | CSV    | [`CsvExporter`] | header row + one row per park            |
//! | JSON   | [`JsonExporter`]| object keyed by park name                |

use crate::analysis::ParkSummary;
use crate::{Average, ReviewError};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// =============================================================================
// EXPORT FORMAT
// =============================================================================

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Plain-text report.
    Txt,
    /// Comma-separated values.
    Csv,
    /// JSON object.
    Json,
}

impl ExportFormat {
    /// All formats, in menu order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Csv, ExportFormat::Json];

    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ReviewError::InvalidInput(format!(
                "Unknown export format: {}. Use: txt, csv, json",
                other
            ))),
        }
    }
}

// =============================================================================
// EXPORTER TRAIT
// =============================================================================

/// A serializer of park summaries to one file format.
///
/// Implementors only describe the bytes; writing is shared.
pub trait Exporter: Send + Sync {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Serialize the summaries.
    fn render(&self, summaries: &[ParkSummary]) -> Result<Vec<u8>, ReviewError>;

    /// Render and write the summaries to `path`.
    ///
    /// The format extension is appended when `path` does not already end
    /// with it. Returns the path actually written.
    fn export(&self, summaries: &[ParkSummary], path: &Path) -> Result<PathBuf, ReviewError> {
        let target = validate_output_path(&with_extension(path, self.format().extension()))?;
        let data = self.render(summaries)?;
        std::fs::write(&target, &data)
            .map_err(|e| ReviewError::Io(format!("Write '{}': {}", target.display(), e)))?;
        Ok(target)
    }
}

/// Get the exporter for a format.
#[must_use]
pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Txt => Box::new(TxtExporter),
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Json => Box::new(JsonExporter),
    }
}

// =============================================================================
// TXT
// =============================================================================

/// Report title written at the top of TXT exports.
pub const TXT_REPORT_TITLE: &str = "PARK REVIEWS ANALYSIS REPORT";

/// Human-readable plain-text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtExporter;

impl Exporter for TxtExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Txt
    }

    fn render(&self, summaries: &[ParkSummary]) -> Result<Vec<u8>, ReviewError> {
        let mut out = String::new();
        out.push_str(TXT_REPORT_TITLE);
        out.push('\n');
        out.push_str(&"=".repeat(40));
        out.push_str("\n\n");

        for summary in summaries {
            out.push_str(&format!("PARK: {}\n", summary.park));
            out.push_str(&"-".repeat(30));
            out.push('\n');
            out.push_str(&format!("Total Reviews: {}\n", summary.total_reviews));
            out.push_str(&format!("Positive Reviews: {}\n", summary.positive_reviews));
            out.push_str(&format!("Average Rating: {}\n", summary.average_rating));
            out.push_str(&format!("Number of Countries: {}\n", summary.country_count));
            out.push('\n');
        }

        Ok(out.into_bytes())
    }
}

// =============================================================================
// CSV
// =============================================================================

/// Header row of CSV exports.
pub const CSV_HEADER: [&str; 5] = [
    "Park Name",
    "Total Reviews",
    "Positive Reviews",
    "Average Rating",
    "Country Count",
];

/// One row per park, quoted per RFC 4180.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, summaries: &[ParkSummary]) -> Result<Vec<u8>, ReviewError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for summary in summaries {
            writer.write_record([
                summary.park.clone(),
                summary.total_reviews.to_string(),
                summary.positive_reviews.to_string(),
                summary.average_rating.to_string(),
                summary.country_count.to_string(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| ReviewError::Csv(e.to_string()))
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Per-park values of the JSON export; the park name is the object key.
#[derive(Serialize)]
struct JsonParkStats {
    total_reviews: u64,
    positive_reviews: u64,
    average_rating: Average,
    country_count: usize,
}

/// JSON object keyed by park name, four-space indented.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, summaries: &[ParkSummary]) -> Result<Vec<u8>, ReviewError> {
        let mut object = serde_json::Map::new();
        for summary in summaries {
            let stats = JsonParkStats {
                total_reviews: summary.total_reviews,
                positive_reviews: summary.positive_reviews,
                average_rating: summary.average_rating,
                country_count: summary.country_count,
            };
            let value = serde_json::to_value(&stats)
                .map_err(|e| ReviewError::SerializationError(e.to_string()))?;
            object.insert(summary.park.clone(), value);
        }

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        object
            .serialize(&mut serializer)
            .map_err(|e| ReviewError::SerializationError(e.to_string()))?;
        out.push(b'\n');
        Ok(out)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Append `.ext` unless the path already ends with it (case-insensitive).
fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));
    if has_ext {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Validate an output path: the parent directory must exist.
///
/// Returns the path with a canonical parent and the original file name.
fn validate_output_path(path: &Path) -> Result<PathBuf, ReviewError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ReviewError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(ReviewError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| ReviewError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// TESTS
// =============================================================================
