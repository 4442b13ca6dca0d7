//! # Property-Based Tests
//!
//! Invariants of the aggregation pass and chart apportionment, checked with
//! proptest over generated datasets.

use parkreview_core::{
    Average, Dataset, Fragment, PieChart, Rating, Review, ReviewId, YearMonth, park_summaries,
    review_counts_per_park, top_locations_by_rating,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::cmp::Ordering;

const PARKS: [&str; 3] = ["Disneyland_HongKong", "Disneyland_California", "Disneyland_Paris"];
const LOCATIONS: [&str; 5] = ["Australia", "Canada", "France", "India", "Peru"];

/// Strategy: (rating, park index, location index, optional month).
fn row() -> impl Strategy<Value = (u8, usize, usize, Option<u8>)> {
    (1u8..=5, 0..PARKS.len(), 0..LOCATIONS.len(), proptest::option::of(1u8..=12))
}

fn build(rows: &[(u8, usize, usize, Option<u8>)]) -> Dataset {
    let reviews = rows
        .iter()
        .enumerate()
        .map(|(i, (rating, park, location, month))| {
            Review::new(
                ReviewId(i as u64),
                Rating::new(*rating).expect("rating"),
                month.map(|m| YearMonth::new(2019, m).expect("month")),
                LOCATIONS[*location],
                PARKS[*park],
            )
        })
        .collect();
    Dataset::new(reviews)
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Per-park counts always add up to the number of reviews.
    #[test]
    fn counts_partition_the_dataset(rows in vec(row(), 0..200)) {
        let dataset = build(&rows);
        let counts = review_counts_per_park(&dataset);
        prop_assert_eq!(counts.values().sum::<usize>(), dataset.len());
    }

    /// Every non-empty average stays on the rating scale.
    #[test]
    fn summaries_stay_on_scale(rows in vec(row(), 1..200)) {
        let dataset = build(&rows);
        for summary in park_summaries(&dataset) {
            let h = summary.average_rating.hundredths();
            prop_assert!((100..=500).contains(&h));
            prop_assert!(summary.positive_reviews <= summary.total_reviews);
            prop_assert!(summary.country_count <= LOCATIONS.len());
        }
    }

    /// Top locations are sorted by exact mean, descending, and bounded by n.
    #[test]
    fn top_locations_sorted_and_bounded(rows in vec(row(), 0..200), n in 0usize..8) {
        let dataset = build(&rows);
        let park = Fragment::new("disneyland").expect("fragment");
        let top = top_locations_by_rating(&dataset, &park, n);

        prop_assert!(top.len() <= n);
        for pair in top.windows(2) {
            prop_assert_ne!(pair[0].average.cmp_mean(&pair[1].average), Ordering::Less);
        }
    }

    /// The pie strip always fills the requested width exactly.
    #[test]
    fn pie_strip_fills_width(values in vec(0u64..100_000, 1..12), width in 10usize..200) {
        let slices = values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("p{}", i), *v))
            .collect();
        let chart = PieChart::new("prop", slices).with_width(width);
        let lengths = chart.strip_lengths();

        if chart.total() == 0 {
            prop_assert!(lengths.iter().all(|l| *l == 0));
        } else {
            prop_assert_eq!(lengths.iter().sum::<usize>(), width);
        }
    }

    /// Rounded hundredths never drift more than half a hundredth from the exact mean.
    #[test]
    fn hundredths_round_correctly(sum in 0u64..1_000_000, count in 1u64..10_000) {
        let h = Average::from_parts(sum, count).hundredths() as u128;
        let exact_x2 = sum as u128 * 200;
        let count = count as u128;
        // |h - sum*100/count| <= 1/2  <=>  |2*h*count - 200*sum| <= count
        let lhs = 2 * h * count;
        let diff = lhs.abs_diff(exact_x2);
        prop_assert!(diff <= count);
    }
}
