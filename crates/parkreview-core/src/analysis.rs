//! # Analysis Module
//!
//! Aggregations over a loaded [`Dataset`].
//!
//! Every operation is a single pass over the reviews. Grouped results use
//! `BTreeMap` so output order never depends on hashing, and all means are
//! exact [`Average`] values.
//!
//! | Operation                      | Used by                          |
//! |--------------------------------|----------------------------------|
//! | [`reviews_for_park`]           | view reviews of a park           |
//! | [`count_by_park_and_location`] | count reviews from a location    |
//! | [`average_rating_for_year`]    | yearly average of a park         |
//! | [`park_location_averages`]     | average per park and location   |
//! | [`review_counts_per_park`]     | pie chart                        |
//! | [`top_locations_by_rating`]    | top-locations bar chart          |
//! | [`monthly_averages`]           | monthly bar chart                |
//! | [`park_summaries`]             | export                           |

use crate::filter::Fragment;
use crate::primitives::MONTH_NAMES;
use crate::{Average, Dataset, Review};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A reviewer location with its average rating for one park.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRating {
    /// Reviewer location.
    pub location: String,
    /// Mean rating given from this location.
    pub average: Average,
}

/// Average rating per calendar month, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlyAverages {
    months: [Average; 12],
}

impl MonthlyAverages {
    /// Average for a month (1 = January). `None` if the month has no review.
    #[must_use]
    pub fn get(&self, month: u8) -> Option<Average> {
        let index = usize::from(month).checked_sub(1)?;
        self.months.get(index).copied().filter(|a| !a.is_empty())
    }

    /// `(month name, average)` pairs, January first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<Average>)> + '_ {
        MONTH_NAMES
            .iter()
            .zip(self.months.iter())
            .map(|(name, avg)| (*name, (!avg.is_empty()).then_some(*avg)))
    }

    /// Whether no month has any review.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.iter().all(Average::is_empty)
    }
}

/// Aggregate statistics of one park, as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkSummary {
    /// Park name.
    pub park: String,
    /// Number of reviews.
    pub total_reviews: u64,
    /// Reviews rated at or above the positive threshold.
    pub positive_reviews: u64,
    /// Mean rating.
    pub average_rating: Average,
    /// Number of distinct reviewer locations.
    pub country_count: usize,
}

// =============================================================================
// VIEW OPERATIONS
// =============================================================================

/// All reviews of the matching park(s), in file order.
#[must_use]
pub fn reviews_for_park<'a>(dataset: &'a Dataset, park: &Fragment) -> Vec<&'a Review> {
    dataset
        .reviews()
        .iter()
        .filter(|r| park.matches(&r.park))
        .collect()
}

/// Number of reviews of the matching park(s) from the matching location(s).
#[must_use]
pub fn count_by_park_and_location(dataset: &Dataset, park: &Fragment, location: &Fragment) -> usize {
    dataset
        .reviews()
        .iter()
        .filter(|r| park.matches(&r.park) && location.matches(&r.reviewer_location))
        .count()
}

/// Average rating of the matching park(s) for reviews dated in `year`.
///
/// Returns `None` when no review matches.
#[must_use]
pub fn average_rating_for_year(dataset: &Dataset, park: &Fragment, year: u16) -> Option<Average> {
    let mut average = Average::new();
    for review in dataset.reviews() {
        let in_year = review.year_month.is_some_and(|ym| ym.year == year);
        if in_year && park.matches(&review.park) {
            average.record(review.rating);
        }
    }
    (!average.is_empty()).then_some(average)
}

/// Average rating for every park from every reviewer location.
#[must_use]
pub fn park_location_averages(dataset: &Dataset) -> BTreeMap<String, BTreeMap<String, Average>> {
    let mut result: BTreeMap<String, BTreeMap<String, Average>> = BTreeMap::new();
    for review in dataset.reviews() {
        result
            .entry(review.park.clone())
            .or_default()
            .entry(review.reviewer_location.clone())
            .or_default()
            .record(review.rating);
    }
    result
}

// =============================================================================
// CHART OPERATIONS
// =============================================================================

/// Number of reviews per park.
#[must_use]
pub fn review_counts_per_park(dataset: &Dataset) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for review in dataset.reviews() {
        *counts.entry(review.park.clone()).or_default() += 1;
    }
    counts
}

/// The `n` reviewer locations with the highest average rating for a park.
///
/// Ordering: average descending, then number of reviews descending, then
/// location name ascending.
#[must_use]
pub fn top_locations_by_rating(dataset: &Dataset, park: &Fragment, n: usize) -> Vec<LocationRating> {
    let mut by_location: BTreeMap<&str, Average> = BTreeMap::new();
    for review in dataset.reviews().iter().filter(|r| park.matches(&r.park)) {
        by_location
            .entry(review.reviewer_location.as_str())
            .or_default()
            .record(review.rating);
    }

    let mut ranked: Vec<LocationRating> = by_location
        .into_iter()
        .map(|(location, average)| LocationRating {
            location: location.to_string(),
            average,
        })
        .collect();

    ranked.sort_by(|a, b| rank_locations(a, b));
    ranked.truncate(n);
    ranked
}

fn rank_locations(a: &LocationRating, b: &LocationRating) -> Ordering {
    b.average
        .cmp_mean(&a.average)
        .then_with(|| b.average.count().cmp(&a.average.count()))
        .then_with(|| a.location.cmp(&b.location))
}

/// Average rating of the matching park(s) for each calendar month,
/// across all years. Reviews without a visit month are ignored.
#[must_use]
pub fn monthly_averages(dataset: &Dataset, park: &Fragment) -> MonthlyAverages {
    let mut monthly = MonthlyAverages::default();
    for review in dataset.reviews().iter().filter(|r| park.matches(&r.park)) {
        let Some(ym) = review.year_month else {
            continue;
        };
        if let Some(slot) = usize::from(ym.month)
            .checked_sub(1)
            .and_then(|i| monthly.months.get_mut(i))
        {
            slot.record(review.rating);
        }
    }
    monthly
}

// =============================================================================
// EXPORT AGGREGATE
// =============================================================================

#[derive(Default)]
struct SummaryAccumulator<'a> {
    total: u64,
    positive: u64,
    average: Average,
    locations: BTreeSet<&'a str>,
}

/// Per-park statistics for export, sorted by park name.
#[must_use]
pub fn park_summaries(dataset: &Dataset) -> Vec<ParkSummary> {
    let mut parks: BTreeMap<&str, SummaryAccumulator<'_>> = BTreeMap::new();
    for review in dataset.reviews() {
        let acc = parks.entry(review.park.as_str()).or_default();
        acc.total += 1;
        if review.rating.is_positive() {
            acc.positive += 1;
        }
        acc.average.record(review.rating);
        acc.locations.insert(review.reviewer_location.as_str());
    }

    parks
        .into_iter()
        .map(|(park, acc)| ParkSummary {
            park: park.to_string(),
            total_reviews: acc.total,
            positive_reviews: acc.positive,
            average_rating: acc.average,
            country_count: acc.locations.len(),
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
