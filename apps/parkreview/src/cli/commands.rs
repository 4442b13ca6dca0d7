//! # CLI Command Implementations
//!
//! Every command writes to a caller-supplied `Write` so the same output can
//! go to stdout, the interactive menu, or a test buffer.

use super::ChartKind;
use crate::config::Config;
use parkreview_core::{
    Average, BarChart, Dataset, ExportFormat, Fragment, LoadReport, PieChart, Review, ReviewError,
    average_rating_for_year, count_by_park_and_location, exporter_for, monthly_averages,
    park_location_averages, park_summaries, parse_year, review_counts_per_park, reviews_for_park,
    top_locations_by_rating,
};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Rejected rows logged individually before switching to a count.
const MAX_LOGGED_REJECTIONS: usize = 5;

// =============================================================================
// DATASET LOADING
// =============================================================================

/// Load the configured dataset and log what the loader skipped.
pub fn load_dataset(config: &Config) -> Result<(Dataset, LoadReport), ReviewError> {
    tracing::debug!(
        path = %config.data_path.display(),
        strict = config.strict,
        "Loading review dataset"
    );
    let (dataset, report) = Dataset::load(&config.data_path, config.load_policy())?;

    for rejected in report.rejected.iter().take(MAX_LOGGED_REJECTIONS) {
        tracing::warn!(line = rejected.line, "Skipped row: {}", rejected.reason);
    }
    if report.rejected.len() > MAX_LOGGED_REJECTIONS {
        tracing::warn!(
            "Skipped {} more malformed rows",
            report.rejected.len() - MAX_LOGGED_REJECTIONS
        );
    }

    tracing::info!(
        accepted = report.accepted,
        rejected = report.rejected.len(),
        "Loaded {} reviews from {}",
        dataset.len(),
        config.data_path.display()
    );
    Ok((dataset, report))
}

// =============================================================================
// FORMATTING HELPERS
// =============================================================================

/// Format a count with thousands separators (`42656` -> `42,656`).
#[must_use]
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn write_json(out: &mut impl Write, value: &serde_json::Value) -> Result<(), ReviewError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ReviewError::SerializationError(e.to_string()))?;
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Print reviews in the "Review #i" block layout.
///
/// With a limit, only the first `limit` are shown followed by a remainder line.
pub fn write_reviews(
    out: &mut impl Write,
    reviews: &[&Review],
    limit: Option<usize>,
) -> Result<(), ReviewError> {
    if reviews.is_empty() {
        writeln!(out, "\nNo reviews found.")?;
        return Ok(());
    }

    writeln!(out, "\nFound {} reviews:", reviews.len())?;
    writeln!(out, "{}", "-".repeat(60))?;

    let shown = limit.unwrap_or(reviews.len()).min(reviews.len());
    for (i, review) in reviews.iter().take(shown).enumerate() {
        writeln!(out, "Review #{}", i + 1)?;
        writeln!(out, "Park: {}", review.park)?;
        writeln!(out, "Rating: {}/5", review.rating)?;
        writeln!(out, "Location: {}", review.reviewer_location)?;
        match review.year_month {
            Some(ym) => writeln!(out, "Date: {}", ym)?,
            None => writeln!(out, "Date: N/A")?,
        }
        writeln!(out, "{}", "-".repeat(30))?;
    }

    if shown < reviews.len() {
        writeln!(out, "... and {} more reviews.", reviews.len() - shown)?;
    }
    Ok(())
}

/// Print per-park location averages.
///
/// `preview` caps the locations listed per park; the rest are summarised.
pub fn write_location_averages(
    out: &mut impl Write,
    averages: &BTreeMap<String, BTreeMap<String, Average>>,
    preview: Option<usize>,
) -> Result<(), ReviewError> {
    for (park, locations) in averages {
        writeln!(out, "\nPARK: {}", park)?;
        writeln!(out, "{}", "-".repeat(30))?;

        let shown = preview.unwrap_or(locations.len()).min(locations.len());
        for (location, average) in locations.iter().take(shown) {
            writeln!(out, "{}: {}/5", location, average)?;
        }
        if shown < locations.len() {
            writeln!(out, "... and {} more locations.", locations.len() - shown)?;
        }
    }
    Ok(())
}

/// Print the outcome of a yearly average lookup.
pub fn write_year_average(
    out: &mut impl Write,
    park: &Fragment,
    year: u16,
    average: Option<Average>,
) -> Result<(), ReviewError> {
    match average {
        Some(avg) => writeln!(out, "\nAverage rating for {} in {}: {}/5", park, year, avg)?,
        None => writeln!(out, "\nNo reviews found for {} in {}.", park, year)?,
    }
    Ok(())
}

// =============================================================================
// CHART BUILDERS
// =============================================================================

/// Pie chart of reviews per park.
#[must_use]
pub fn pie_chart(dataset: &Dataset, width: usize) -> PieChart {
    PieChart::reviews_per_park(&review_counts_per_park(dataset)).with_width(width)
}

/// Top-N locations chart, or `None` when no review matches the park.
#[must_use]
pub fn top_locations_chart(
    dataset: &Dataset,
    park: &Fragment,
    top_n: usize,
    width: usize,
) -> Option<BarChart> {
    let ranked = top_locations_by_rating(dataset, park, top_n);
    if ranked.is_empty() {
        return None;
    }
    Some(BarChart::top_locations(park.as_str(), &ranked).with_width(width))
}

/// Monthly average chart, or `None` when no dated review matches the park.
#[must_use]
pub fn monthly_chart(dataset: &Dataset, park: &Fragment, width: usize) -> Option<BarChart> {
    let monthly = monthly_averages(dataset, park);
    if monthly.is_empty() {
        return None;
    }
    Some(BarChart::monthly(park.as_str(), &monthly).with_width(width))
}

// =============================================================================
// EXPORT
// =============================================================================

/// Export per-park summaries in `format` to `target` (extension appended).
pub fn export_summaries(
    dataset: &Dataset,
    format: ExportFormat,
    target: &Path,
) -> Result<PathBuf, ReviewError> {
    let summaries = park_summaries(dataset);
    let written = exporter_for(format).export(&summaries, target)?;
    tracing::info!(
        format = %format,
        parks = summaries.len(),
        "Exported summary to {}",
        written.display()
    );
    Ok(written)
}

// =============================================================================
// INFO COMMAND
// =============================================================================

/// Show what was loaded.
pub fn cmd_info(
    dataset: &Dataset,
    report: &LoadReport,
    config: &Config,
    json_mode: bool,
    out: &mut impl Write,
) -> Result<(), ReviewError> {
    let counts = review_counts_per_park(dataset);

    if json_mode {
        let output = serde_json::json!({
            "data_path": config.data_path.to_string_lossy(),
            "total_reviews": dataset.len(),
            "rejected_rows": report.rejected.len(),
            "parks": counts,
        });
        return write_json(out, &output);
    }

    writeln!(out, "Park Review Dataset")?;
    writeln!(out, "===================")?;
    writeln!(out, "Data file:     {}", config.data_path.display())?;
    writeln!(out, "Reviews:       {}", group_thousands(dataset.len()))?;
    writeln!(out, "Rejected rows: {}", report.rejected.len())?;
    writeln!(out)?;
    writeln!(out, "Parks:")?;
    for (park, count) in &counts {
        writeln!(out, "  {:<28} {:>8}", park, group_thousands(*count))?;
    }
    Ok(())
}

// =============================================================================
// VIEW COMMANDS
// =============================================================================

/// List the reviews of a park.
pub fn cmd_reviews(
    dataset: &Dataset,
    json_mode: bool,
    out: &mut impl Write,
    park: &str,
    limit: Option<usize>,
) -> Result<(), ReviewError> {
    let park = Fragment::new(park)?;
    let reviews = reviews_for_park(dataset, &park);

    if json_mode {
        let shown: Vec<serde_json::Value> = reviews
            .iter()
            .take(limit.unwrap_or(reviews.len()))
            .map(|r| {
                serde_json::json!({
                    "id": r.id.0,
                    "park": r.park,
                    "rating": r.rating.value(),
                    "location": r.reviewer_location,
                    "date": r.year_month.map(|ym| ym.to_string()),
                })
            })
            .collect();
        let output = serde_json::json!({
            "park": park.as_str(),
            "total": reviews.len(),
            "reviews": shown,
        });
        return write_json(out, &output);
    }

    write_reviews(out, &reviews, limit)
}

/// Count reviews of a park from a reviewer location.
pub fn cmd_count(
    dataset: &Dataset,
    json_mode: bool,
    out: &mut impl Write,
    park: &str,
    location: &str,
) -> Result<(), ReviewError> {
    let park = Fragment::new(park)?;
    let location = Fragment::new(location)?;
    let count = count_by_park_and_location(dataset, &park, &location);

    if json_mode {
        let output = serde_json::json!({
            "park": park.as_str(),
            "location": location.as_str(),
            "count": count,
        });
        return write_json(out, &output);
    }

    writeln!(
        out,
        "\nNumber of reviews for {} from {}: {}",
        park, location, count
    )?;
    Ok(())
}

/// Average rating of a park in a year.
pub fn cmd_year_average(
    dataset: &Dataset,
    json_mode: bool,
    out: &mut impl Write,
    park: &str,
    year: &str,
) -> Result<(), ReviewError> {
    let park = Fragment::new(park)?;
    let year = parse_year(year)?;
    let average = average_rating_for_year(dataset, &park, year);

    if json_mode {
        let output = serde_json::json!({
            "park": park.as_str(),
            "year": year,
            "average_rating": average,
            "review_count": average.map_or(0, |a| a.count()),
        });
        return write_json(out, &output);
    }

    write_year_average(out, &park, year, average)
}

/// Average rating per park per reviewer location.
pub fn cmd_location_averages(
    dataset: &Dataset,
    config: &Config,
    json_mode: bool,
    out: &mut impl Write,
    all: bool,
) -> Result<(), ReviewError> {
    let averages = park_location_averages(dataset);

    if json_mode {
        return write_json(out, &serde_json::json!(averages));
    }

    let preview = (!all).then_some(config.location_preview);
    write_location_averages(out, &averages, preview)
}

// =============================================================================
// CHART COMMAND
// =============================================================================

/// Render one of the three charts.
pub fn cmd_chart(
    dataset: &Dataset,
    config: &Config,
    json_mode: bool,
    out: &mut impl Write,
    kind: ChartKind,
    park: Option<&str>,
    width: Option<usize>,
) -> Result<(), ReviewError> {
    let width = width.unwrap_or(config.chart_width);
    let require_park = || -> Result<Fragment, ReviewError> {
        let park = park.ok_or_else(|| {
            ReviewError::InvalidInput(format!("--park is required for the {} chart", kind))
        })?;
        Fragment::new(park)
    };

    match kind {
        ChartKind::Pie => {
            if json_mode {
                return write_json(out, &serde_json::json!(review_counts_per_park(dataset)));
            }
            write!(out, "{}", pie_chart(dataset, width))?;
            Ok(())
        }
        ChartKind::TopLocations => {
            let park = require_park()?;
            if json_mode {
                let ranked = top_locations_by_rating(dataset, &park, config.top_n);
                return write_json(out, &serde_json::json!(ranked));
            }
            write_bar_chart(
                out,
                &park,
                top_locations_chart(dataset, &park, config.top_n, width),
            )
        }
        ChartKind::Monthly => {
            let park = require_park()?;
            if json_mode {
                let monthly: serde_json::Map<String, serde_json::Value> =
                    monthly_averages(dataset, &park)
                        .iter()
                        .map(|(month, avg)| (month.to_string(), serde_json::json!(avg)))
                        .collect();
                return write_json(out, &serde_json::Value::Object(monthly));
            }
            write_bar_chart(out, &park, monthly_chart(dataset, &park, width))
        }
    }
}

fn write_bar_chart(
    out: &mut impl Write,
    park: &Fragment,
    chart: Option<BarChart>,
) -> Result<(), ReviewError> {
    match chart {
        Some(chart) => write!(out, "{}", chart)?,
        None => writeln!(out, "No data found for park: {}", park)?,
    }
    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Export per-park summaries.
pub fn cmd_export(
    dataset: &Dataset,
    config: &Config,
    json_mode: bool,
    out: &mut impl Write,
    format: &str,
    output: Option<&Path>,
) -> Result<(), ReviewError> {
    let format: ExportFormat = format.parse()?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.export_target());
    let written = export_summaries(dataset, format, &target)?;

    if json_mode {
        let output = serde_json::json!({
            "format": format.extension(),
            "path": written.to_string_lossy(),
        });
        return write_json(out, &output);
    }

    writeln!(out, "Successfully exported to {}", written.display())?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(42_656), "42,656");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn empty_review_list() {
        let mut out = Vec::new();
        write_reviews(&mut out, &[], None).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "\nNo reviews found.\n");
    }
}
