//! # Dataset Module
//!
//! CSV loading and row validation for parkreview.
//!
//! - Validate the file before reading (regular file, size limit)
//! - Require the schema columns in the header row
//! - Reduce every row to a typed [`Review`] or reject it
//! - No enrichment: values are trimmed, never reinterpreted

use crate::primitives::{MAX_DATA_FILE_SIZE, REQUIRED_COLUMNS, UNKNOWN_LOCATION};
use crate::{Rating, Review, ReviewError, ReviewId, YearMonth};
use csv::{ByteRecord, StringRecord};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

// =============================================================================
// LOAD POLICY & REPORT
// =============================================================================

/// How malformed rows are handled while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Skip malformed rows and list them in the [`LoadReport`].
    #[default]
    Lenient,
    /// Fail on the first malformed row.
    Strict,
}

/// A row that was skipped during a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    /// Why the row was rejected.
    pub reason: String,
}

/// Outcome of a load: how many rows were kept and which were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of reviews accepted into the dataset.
    pub accepted: usize,
    /// Rows skipped under [`LoadPolicy::Lenient`], in file order.
    pub rejected: Vec<RejectedRow>,
}

// =============================================================================
// RAW ROW
// =============================================================================

/// One CSV row before validation. Every field is kept as text.
#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(rename = "Review_ID")]
    review_id: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Year_Month")]
    year_month: String,
    #[serde(rename = "Reviewer_Location")]
    reviewer_location: String,
    #[serde(rename = "Review_Text", default)]
    review_text: String,
    #[serde(rename = "Branch")]
    branch: String,
}

impl RawReview {
    /// Validate and convert into a typed review.
    fn into_review(self) -> Result<Review, ReviewError> {
        let id_text = self.review_id.trim();
        let id: u64 = id_text.parse().map_err(|_| ReviewError::InvalidField {
            field: "review_id",
            value: id_text.to_string(),
        })?;

        let rating = Rating::parse(&self.rating)?;
        let year_month = YearMonth::parse(&self.year_month)?;

        let park = self.branch.trim();
        if park.is_empty() {
            return Err(ReviewError::InvalidField {
                field: "park",
                value: String::new(),
            });
        }

        let location = match self.reviewer_location.trim() {
            "" => UNKNOWN_LOCATION,
            other => other,
        };

        Ok(Review::new(ReviewId(id), rating, year_month, location, park).with_text(self.review_text))
    }
}

// =============================================================================
// DATASET
// =============================================================================

/// The in-memory review table.
///
/// Loaded once at startup and only read afterwards. Reviews keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    reviews: Vec<Review>,
}

impl Dataset {
    /// Wrap already-validated reviews.
    #[must_use]
    pub fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    /// Load a dataset from a CSV file on disk.
    ///
    /// The path must name a regular file no larger than `MAX_DATA_FILE_SIZE`.
    pub fn load(path: &Path, policy: LoadPolicy) -> Result<(Self, LoadReport), ReviewError> {
        let validated = validate_data_path(path)?;
        let file = File::open(&validated).map_err(|e| {
            ReviewError::Io(format!("Cannot open '{}': {}", validated.display(), e))
        })?;
        Self::from_reader(BufReader::new(file), policy)
    }

    /// Load a dataset from CSV text.
    pub fn from_csv_str(csv: &str, policy: LoadPolicy) -> Result<(Self, LoadReport), ReviewError> {
        Self::from_reader(csv.as_bytes(), policy)
    }

    /// Load a dataset from any CSV source with a header row.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected;
    /// review text in scraped datasets is frequently mis-encoded.
    pub fn from_reader<R: Read>(
        reader: R,
        policy: LoadPolicy,
    ) -> Result<(Self, LoadReport), ReviewError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = StringRecord::from_byte_record_lossy(csv_reader.byte_headers()?.clone());
        check_required_columns(&headers)?;

        let mut reviews = Vec::new();
        let mut report = LoadReport::default();
        let mut raw = ByteRecord::new();

        loop {
            let line = csv_reader.position().line();
            match csv_reader.read_byte_record(&mut raw) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    reject(&mut report, policy, line, e.to_string())?;
                    continue;
                }
            }

            let line = raw.position().map(|p| p.line()).unwrap_or(line);
            let record = StringRecord::from_byte_record_lossy(raw.clone());

            let parsed = record
                .deserialize::<RawReview>(Some(&headers))
                .map_err(ReviewError::from)
                .and_then(RawReview::into_review);

            match parsed {
                Ok(review) => reviews.push(review),
                Err(e) => reject(&mut report, policy, line, e.to_string())?,
            }
        }

        if reviews.is_empty() {
            return Err(ReviewError::EmptyDataset);
        }

        report.accepted = reviews.len();
        Ok((Self { reviews }, report))
    }

    /// All reviews in file order.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Number of reviews.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Whether the dataset holds no review.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Distinct park names, sorted.
    #[must_use]
    pub fn parks(&self) -> Vec<&str> {
        self.reviews
            .iter()
            .map(|r| r.park.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Record a malformed row, or fail under the strict policy.
fn reject(
    report: &mut LoadReport,
    policy: LoadPolicy,
    line: u64,
    reason: String,
) -> Result<(), ReviewError> {
    match policy {
        LoadPolicy::Strict => Err(ReviewError::InvalidRecord { line, reason }),
        LoadPolicy::Lenient => {
            report.rejected.push(RejectedRow { line, reason });
            Ok(())
        }
    }
}

/// Ensure every required column is present in the header row.
fn check_required_columns(headers: &StringRecord) -> Result<(), ReviewError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReviewError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Validate a data file path before reading.
///
/// Canonicalizes the path, requires a regular file, and enforces
/// `MAX_DATA_FILE_SIZE`.
fn validate_data_path(path: &Path) -> Result<PathBuf, ReviewError> {
    let canonical = path.canonicalize().map_err(|e| {
        ReviewError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ReviewError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| ReviewError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > MAX_DATA_FILE_SIZE {
        return Err(ReviewError::FileTooLarge {
            size: metadata.len(),
            max: MAX_DATA_FILE_SIZE,
        });
    }

    Ok(canonical)
}

// =============================================================================
// TESTS
// =============================================================================
