//! # Chart Module
//!
//! Terminal renderings of the three review charts.
//!
//! - [`PieChart`]: share of reviews per park, drawn as one proportional strip
//!   plus a legend
//! - [`BarChart`]: horizontal bars against a fixed 0 - 5.50 rating axis
//!
//! Both implement `Display`. Cell counts are computed with integer arithmetic;
//! the pie strip always has exactly `width` cells (largest-remainder
//! apportionment).

use crate::analysis::{LocationRating, MonthlyAverages};
use crate::primitives::{
    DEFAULT_CHART_WIDTH, MAX_CHART_WIDTH, MIN_CHART_WIDTH, RATING_AXIS_MAX_HUNDREDTHS,
};
use crate::Average;
use std::collections::BTreeMap;
use std::fmt;

/// Slice glyphs, cycled when there are more slices than glyphs.
const SLICE_GLYPHS: [char; 8] = ['█', '▓', '▒', '░', '#', '*', '+', '='];

/// Glyph used for bars.
const BAR_GLYPH: char = '█';

fn clamp_width(width: usize) -> usize {
    width.clamp(MIN_CHART_WIDTH, MAX_CHART_WIDTH)
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

// =============================================================================
// PIE CHART
// =============================================================================

/// Share of a whole, one slice per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieChart {
    title: String,
    slices: Vec<(String, u64)>,
    width: usize,
}

impl PieChart {
    /// Create a pie chart from labelled counts.
    #[must_use]
    pub fn new(title: impl Into<String>, slices: Vec<(String, u64)>) -> Self {
        Self {
            title: title.into(),
            slices,
            width: DEFAULT_CHART_WIDTH,
        }
    }

    /// "Distribution of Reviews per Park".
    #[must_use]
    pub fn reviews_per_park(counts: &BTreeMap<String, usize>) -> Self {
        let slices = counts
            .iter()
            .map(|(park, count)| (park.clone(), *count as u64))
            .collect();
        Self::new("Distribution of Reviews per Park", slices)
    }

    /// Set the strip width, clamped to the supported range.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = clamp_width(width);
        self
    }

    /// Sum of all slice values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|(_, v)| *v).sum()
    }

    /// Cells per slice in the strip.
    ///
    /// The lengths sum to the width whenever the total is non-zero. Leftover
    /// cells go to the largest remainders, earlier slices first on ties.
    #[must_use]
    pub fn strip_lengths(&self) -> Vec<usize> {
        let total = self.total() as u128;
        if total == 0 {
            return vec![0; self.slices.len()];
        }
        let width = self.width as u128;

        let mut lengths = Vec::with_capacity(self.slices.len());
        let mut remainders = Vec::with_capacity(self.slices.len());
        for (index, (_, value)) in self.slices.iter().enumerate() {
            let exact = *value as u128 * width;
            lengths.push((exact / total) as usize);
            remainders.push((exact % total, index));
        }

        let assigned: usize = lengths.iter().sum();
        let leftover = self.width.saturating_sub(assigned);
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for (_, index) in remainders.into_iter().take(leftover) {
            if let Some(len) = lengths.get_mut(index) {
                *len += 1;
            }
        }
        lengths
    }

    /// Share of a slice in tenths of a percent, rounded half-up.
    #[must_use]
    pub fn share_tenths(&self, value: u64) -> u64 {
        let total = self.total() as u128;
        if total == 0 {
            return 0;
        }
        ((value as u128 * 2000 + total) / (2 * total)) as u64
    }
}

impl fmt::Display for PieChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;

        if self.total() == 0 {
            return writeln!(f, "No data to visualize.");
        }

        let glyph = |i: usize| SLICE_GLYPHS[i % SLICE_GLYPHS.len()];

        let mut strip = String::with_capacity(self.width * 3);
        for (index, len) in self.strip_lengths().into_iter().enumerate() {
            strip.extend(std::iter::repeat_n(glyph(index), len));
        }
        writeln!(f, "[{}]", strip)?;
        writeln!(f)?;

        let pad = label_width(self.slices.iter().map(|(l, _)| l.as_str()));
        for (index, (label, value)) in self.slices.iter().enumerate() {
            let tenths = self.share_tenths(*value);
            writeln!(
                f,
                "  {} {:<pad$}  {:>8}  {:>3}.{}%",
                glyph(index),
                label,
                value,
                tenths / 10,
                tenths % 10,
                pad = pad
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// BAR CHART
// =============================================================================

/// Horizontal bars of average ratings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    title: String,
    x_label: String,
    y_label: String,
    bars: Vec<(String, Option<Average>)>,
    width: usize,
}

impl BarChart {
    /// Create a bar chart. A bar without an average renders as `-`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        bars: Vec<(String, Option<Average>)>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars,
            width: DEFAULT_CHART_WIDTH,
        }
    }

    /// "Top N Locations by Average Rating for {park}".
    #[must_use]
    pub fn top_locations(park: &str, ranked: &[LocationRating]) -> Self {
        let bars = ranked
            .iter()
            .map(|l| (l.location.clone(), Some(l.average)))
            .collect();
        Self::new(
            format!("Top {} Locations by Average Rating for {}", ranked.len(), park),
            "Reviewer Location",
            "Average Rating",
            bars,
        )
    }

    /// "Average Monthly Rating for {park}".
    #[must_use]
    pub fn monthly(park: &str, monthly: &MonthlyAverages) -> Self {
        let bars = monthly
            .iter()
            .map(|(month, avg)| (month.to_string(), avg))
            .collect();
        Self::new(
            format!("Average Monthly Rating for {}", park),
            "Month",
            "Average Rating",
            bars,
        )
    }

    /// Set the bar area width, clamped to the supported range.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = clamp_width(width);
        self
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the chart has no bar.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Cells for an average on the 0 - 5.50 axis, rounded half-up.
    #[must_use]
    pub fn bar_length(&self, average: &Average) -> usize {
        let hundredths = average.hundredths().min(RATING_AXIS_MAX_HUNDREDTHS) as u128;
        let width = self.width as u128;
        let axis = RATING_AXIS_MAX_HUNDREDTHS as u128;
        ((hundredths * width * 2 + axis) / (2 * axis)) as usize
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;

        if self.bars.is_empty() {
            return writeln!(f, "No data to visualize.");
        }

        let pad = label_width(
            self.bars
                .iter()
                .map(|(l, _)| l.as_str())
                .chain(std::iter::once(self.x_label.as_str())),
        );
        writeln!(
            f,
            "{:<pad$} | {} (0 - 5.50)",
            self.x_label,
            self.y_label,
            pad = pad
        )?;
        writeln!(f, "{}-+-{}", "-".repeat(pad), "-".repeat(self.width))?;

        for (label, average) in &self.bars {
            match average {
                Some(avg) => {
                    let bar: String = std::iter::repeat_n(BAR_GLYPH, self.bar_length(avg)).collect();
                    writeln!(
                        f,
                        "{:<pad$} | {:<width$} {}",
                        label,
                        bar,
                        avg,
                        pad = pad,
                        width = self.width
                    )?;
                }
                None => writeln!(f, "{:<pad$} | -", label, pad = pad)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
