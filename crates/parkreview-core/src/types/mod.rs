//! # Core Type Definitions
//!
//! This module contains all core types for the parkreview dataset engine:
//! - Record identifiers and fields (`ReviewId`, `Rating`, `YearMonth`)
//! - The review record itself (`Review`)
//! - Exact mean accumulator (`Average`)
//! - Error types (`ReviewError`)
//!
//! ## Integer Arithmetic
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Keep averages as exact `(sum, count)` pairs until display
//! - Use saturating arithmetic for accumulators to prevent overflow

use crate::primitives::{MAX_RATING, MIN_RATING, MISSING_MARKER, POSITIVE_THRESHOLD};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIERS
// =============================================================================

/// Identifier of a review as given by the source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReviewId(pub u64);

// =============================================================================
// RATING
// =============================================================================

/// A visitor rating, always within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, rejecting values outside the scale.
    pub fn new(value: u8) -> Result<Self, ReviewError> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewError::InvalidField {
                field: "rating",
                value: value.to_string(),
            })
        }
    }

    /// Parse a rating from its textual form (surrounding whitespace ignored).
    pub fn parse(raw: &str) -> Result<Self, ReviewError> {
        let trimmed = raw.trim();
        let value: u8 = trimmed.parse().map_err(|_| ReviewError::InvalidField {
            field: "rating",
            value: trimmed.to_string(),
        })?;
        Self::new(value)
    }

    /// Get the raw rating value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// A review counts as positive at or above `POSITIVE_THRESHOLD`.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 >= POSITIVE_THRESHOLD
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// YEAR / MONTH
// =============================================================================

/// Calendar month of a visit, as recorded in the `Year_Month` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    /// Four-digit year.
    pub year: u16,
    /// Month, 1 = January.
    pub month: u8,
}

impl YearMonth {
    /// Create a year/month pair, rejecting months outside 1..=12.
    pub fn new(year: u16, month: u8) -> Result<Self, ReviewError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(ReviewError::InvalidField {
                field: "month",
                value: month.to_string(),
            })
        }
    }

    /// Parse the `YYYY-M` / `YYYY-MM` form.
    ///
    /// Empty input and the dataset's `missing` marker yield `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>, ReviewError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MISSING_MARKER) {
            return Ok(None);
        }

        let invalid = || ReviewError::InvalidField {
            field: "year_month",
            value: trimmed.to_string(),
        };

        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        if !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map(Some).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

// =============================================================================
// REVIEW
// =============================================================================

/// A single park visitor review.
///
/// One row of the input dataset after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    /// Source identifier.
    pub id: ReviewId,
    /// Visitor rating.
    pub rating: Rating,
    /// Month of the visit, if the dataset recorded one.
    pub year_month: Option<YearMonth>,
    /// Where the reviewer comes from.
    pub reviewer_location: String,
    /// Free-form review body (may be empty).
    pub text: String,
    /// Park (branch) the review is about.
    pub park: String,
}

impl Review {
    /// Create a new review without text.
    #[must_use]
    pub fn new(
        id: ReviewId,
        rating: Rating,
        year_month: Option<YearMonth>,
        reviewer_location: impl Into<String>,
        park: impl Into<String>,
    ) -> Self {
        Self {
            id,
            rating,
            year_month,
            reviewer_location: reviewer_location.into(),
            text: String::new(),
            park: park.into(),
        }
    }

    /// Attach review text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

// =============================================================================
// AVERAGE (Exact Mean)
// =============================================================================

/// An exact arithmetic mean of ratings, kept as `(sum, count)`.
///
/// Display and serialization round to two decimals (half-up on hundredths),
/// computed with integer arithmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Average {
    sum: u64,
    count: u64,
}

impl Average {
    /// Create an empty average.
    #[must_use]
    pub const fn new() -> Self {
        Self { sum: 0, count: 0 }
    }

    /// Create an average from a precomputed sum and count.
    #[must_use]
    pub const fn from_parts(sum: u64, count: u64) -> Self {
        Self { sum, count }
    }

    /// Add one rating to the mean.
    pub fn record(&mut self, rating: Rating) {
        self.sum = self.sum.saturating_add(rating.value() as u64);
        self.count = self.count.saturating_add(1);
    }

    /// Sum of all recorded ratings.
    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.sum
    }

    /// Number of recorded ratings.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Whether no rating has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The mean in hundredths, rounded half-up (`4.255` -> `426`).
    ///
    /// Returns 0 for an empty average.
    #[must_use]
    pub fn hundredths(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        let scaled = (self.sum as u128) * 200 + self.count as u128;
        (scaled / (2 * self.count as u128)) as u64
    }

    /// Compare two means exactly, without rounding.
    #[must_use]
    pub fn cmp_mean(&self, other: &Self) -> Ordering {
        let lhs = self.sum as u128 * other.count as u128;
        let rhs = other.sum as u128 * self.count as u128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = self.hundredths();
        write!(f, "{}.{:02}", hundredths / 100, hundredths % 100)
    }
}

impl Serialize for Average {
    /// Serialized as a plain number with two decimals (e.g. `4.25`).
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value: f64 = self
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in parkreview.
///
/// - No silent failures
/// - Use `Result<T, ReviewError>` for fallible operations
/// - The core never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum ReviewError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The input header lacks a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A single field could not be parsed or is out of range.
    #[error("Invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    /// A data row was rejected (strict loading only).
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// The input produced no usable review.
    #[error("Dataset contains no valid reviews")]
    EmptyDataset,

    /// The input file is larger than the loader accepts.
    #[error("File size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// User-supplied input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ReviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for ReviewError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
