//! # parkreview CLI Module
//!
//! ## Available Commands
//!
//! - `menu` - Interactive menu (default when no command is given)
//! - `info` - Show the loaded dataset
//! - `reviews` - List reviews for a park
//! - `count` - Count reviews by park and reviewer location
//! - `year-average` - Average rating for a park in a year
//! - `location-averages` - Average rating per park per reviewer location
//! - `chart` - Draw the pie, top-locations, or monthly chart
//! - `export` - Write per-park summaries as TXT, CSV, or JSON

mod commands;

use crate::config::{Config, Overrides};
use crate::menu::Menu;
use clap::{Parser, Subcommand, ValueEnum};
use parkreview_core::ReviewError;
use std::fmt;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// parkreview - theme-park review analysis
///
/// Loads a review CSV once and answers questions about it from an
/// interactive menu or from one-shot commands.
#[derive(Parser, Debug)]
#[command(name = "parkreview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the review CSV (overrides config file and PARKREVIEW_DATA)
    #[arg(short = 'd', long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail on the first malformed row instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu
    Menu,

    /// Show the loaded dataset
    Info,

    /// List all reviews for a park
    Reviews {
        /// Park name or fragment (case-insensitive)
        #[arg(short, long)]
        park: String,

        /// Show at most this many reviews
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Count reviews for a park from a reviewer location
    Count {
        /// Park name or fragment (case-insensitive)
        #[arg(short, long)]
        park: String,

        /// Reviewer location or fragment (case-insensitive)
        #[arg(short, long)]
        location: String,
    },

    /// Average rating for a park in a year
    YearAverage {
        /// Park name or fragment (case-insensitive)
        #[arg(short, long)]
        park: String,

        /// Four-digit year
        #[arg(short, long)]
        year: String,
    },

    /// Average rating per park per reviewer location
    LocationAverages {
        /// List every location instead of a preview per park
        #[arg(long)]
        all: bool,
    },

    /// Draw a chart
    Chart {
        /// Chart to draw
        #[arg(value_enum)]
        kind: ChartKind,

        /// Park name or fragment (top-locations and monthly)
        #[arg(short, long)]
        park: Option<String>,

        /// Chart width in characters
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Export per-park summaries
    Export {
        /// Export format (txt, csv, json)
        #[arg(short = 't', long)]
        format: String,

        /// Output path; the format extension is appended if missing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Charts available from `parkreview chart`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    /// Reviews per park
    Pie,
    /// Highest-rated reviewer locations for a park
    TopLocations,
    /// Average rating per month for a park
    Monthly,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pie => write!(f, "pie"),
            Self::TopLocations => write!(f, "top-locations"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve configuration from the parsed flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, ReviewError> {
    let config = Config::discover(cli.config.as_deref())?
        .with_overrides(Overrides::from_env(cli.data.clone(), cli.strict));
    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ReviewError> {
    let config = resolve_config(&cli)?;
    let (dataset, report) = load_dataset(&config)?;
    let json_mode = cli.json_mode;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = std::io::stdin();
            Menu::new(&dataset, &config, stdin.lock(), out).run()
        }
        Some(Commands::Info) => cmd_info(&dataset, &report, &config, json_mode, &mut out),
        Some(Commands::Reviews { park, limit }) => {
            cmd_reviews(&dataset, json_mode, &mut out, &park, limit)
        }
        Some(Commands::Count { park, location }) => {
            cmd_count(&dataset, json_mode, &mut out, &park, &location)
        }
        Some(Commands::YearAverage { park, year }) => {
            cmd_year_average(&dataset, json_mode, &mut out, &park, &year)
        }
        Some(Commands::LocationAverages { all }) => {
            cmd_location_averages(&dataset, &config, json_mode, &mut out, all)
        }
        Some(Commands::Chart { kind, park, width }) => cmd_chart(
            &dataset,
            &config,
            json_mode,
            &mut out,
            kind,
            park.as_deref(),
            width,
        ),
        Some(Commands::Export { format, output }) => cmd_export(
            &dataset,
            &config,
            json_mode,
            &mut out,
            &format,
            output.as_deref(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "parkreview",
            "count",
            "--park",
            "paris",
            "--location",
            "france",
            "--data",
            "reviews.csv",
            "--json-mode",
        ])
        .expect("parse");
        assert!(cli.json_mode);
        assert_eq!(cli.data, Some(PathBuf::from("reviews.csv")));
        assert!(matches!(cli.command, Some(Commands::Count { .. })));
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["parkreview", "-q"]).expect("parse");
        assert!(cli.quiet);
        assert!(cli.command.is_none());
    }

    #[test]
    fn chart_kind_parses_kebab_case() {
        let cli = Cli::try_parse_from(["parkreview", "chart", "top-locations", "-p", "hong"])
            .expect("parse");
        match cli.command {
            Some(Commands::Chart { kind, park, .. }) => {
                assert_eq!(kind, ChartKind::TopLocations);
                assert_eq!(park.as_deref(), Some("hong"));
            }
            other => unreachable!("unexpected command: {:?}", other),
        }
    }
}
