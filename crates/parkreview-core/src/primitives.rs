//! # Primitives
//!
//! Hardcoded constants for the parkreview dataset engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Configurable behaviour (chart width, top-N, preview size) has its
//! defaults here and its overrides in the application config.

// =============================================================================
// RATING SCALE
// =============================================================================

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A review with `rating >= POSITIVE_THRESHOLD` counts as positive.
pub const POSITIVE_THRESHOLD: u8 = 4;

// =============================================================================
// DATASET SCHEMA
// =============================================================================

/// Column holding the review identifier.
pub const COLUMN_REVIEW_ID: &str = "Review_ID";

/// Column holding the rating.
pub const COLUMN_RATING: &str = "Rating";

/// Column holding the visit month (`YYYY-M`).
pub const COLUMN_YEAR_MONTH: &str = "Year_Month";

/// Column holding the reviewer's location.
pub const COLUMN_REVIEWER_LOCATION: &str = "Reviewer_Location";

/// Column holding the review text (optional).
pub const COLUMN_REVIEW_TEXT: &str = "Review_Text";

/// Column holding the park (branch) name.
pub const COLUMN_BRANCH: &str = "Branch";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COLUMN_REVIEW_ID,
    COLUMN_RATING,
    COLUMN_YEAR_MONTH,
    COLUMN_REVIEWER_LOCATION,
    COLUMN_BRANCH,
];

/// Marker the dataset uses for an unknown visit month.
pub const MISSING_MARKER: &str = "missing";

/// Location used when a row leaves `Reviewer_Location` empty.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Abbreviated month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum size of a dataset file (256 MB).
///
/// Files above this are rejected before reading to prevent memory exhaustion.
pub const MAX_DATA_FILE_SIZE: u64 = 256 * 1024 * 1024;

// =============================================================================
// PRESENTATION DEFAULTS
// =============================================================================

/// Default number of locations in the top-locations chart.
pub const DEFAULT_TOP_N: usize = 10;

/// Default number of locations listed per park before truncating.
pub const DEFAULT_LOCATION_PREVIEW: usize = 5;

/// Default chart width in character cells.
pub const DEFAULT_CHART_WIDTH: usize = 50;

/// Narrowest chart that still renders legibly.
pub const MIN_CHART_WIDTH: usize = 10;

/// Widest chart accepted.
pub const MAX_CHART_WIDTH: usize = 200;

/// Upper bound of the rating axis, in hundredths (5.50).
pub const RATING_AXIS_MAX_HUNDREDTHS: u64 = 550;

/// Default export file name, without extension.
pub const DEFAULT_EXPORT_BASENAME: &str = "park_reviews_summary";
