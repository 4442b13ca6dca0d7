//! # parkreview-core
//!
//! The review dataset engine for parkreview - THE LOGIC.
//!
//! This crate loads a theme-park review CSV into memory once, answers
//! aggregate questions about it, renders terminal charts, and exports
//! per-park summaries.
//!
//! ## Data Flow
//!
//! ```text
//!  reviews.csv ──► dataset (validate rows) ──► Dataset (in memory, read-only)
//!                                                 │
//!                      ┌──────────────────────────┼───────────────────────┐
//!                      ▼                          ▼                       ▼
//!                  analysis                   analysis               analysis
//!              (counts, averages)      (per-park, per-month)      (park_summaries)
//!                      │                          │                       │
//!                      ▼                          ▼                       ▼
//!                 text output                   chart            export (TXT/CSV/JSON)
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging (the binary logs)
//! - Integer arithmetic only; means are exact `(sum, count)` pairs
//! - Deterministic ordering: `BTreeMap` for every grouped result

// =============================================================================
// MODULES
// =============================================================================

pub mod analysis;
pub mod chart;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Average, Rating, Review, ReviewError, ReviewId, YearMonth};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use analysis::{
    LocationRating, MonthlyAverages, ParkSummary, average_rating_for_year,
    count_by_park_and_location, monthly_averages, park_location_averages, park_summaries,
    review_counts_per_park, reviews_for_park, top_locations_by_rating,
};
pub use chart::{BarChart, PieChart};
pub use dataset::{Dataset, LoadPolicy, LoadReport, RejectedRow};
pub use export::{
    CsvExporter, ExportFormat, Exporter, JsonExporter, TxtExporter, exporter_for,
};
pub use filter::{Fragment, parse_year};
