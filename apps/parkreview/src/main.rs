//! # parkreview
//!
//! Theme-park review analysis from the terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/parkreview (THE BINARY)             │
//! │                                                          │
//! │   ┌──────────────┐   ┌──────────────┐   ┌────────────┐   │
//! │   │     CLI      │   │     Menu     │   │   Config   │   │
//! │   │    (clap)    │   │ (stdin/out)  │   │   (toml)   │   │
//! │   └──────┬───────┘   └──────┬───────┘   └─────┬──────┘   │
//! │          └──────────────────┼─────────────────┘          │
//! │                             ▼                            │
//! │                  ┌────────────────────┐                  │
//! │                  │  parkreview-core   │                  │
//! │                  │    (THE LOGIC)     │                  │
//! │                  └────────────────────┘                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Interactive menu
//! parkreview --data disneyland_reviews.csv
//!
//! # One-shot commands
//! parkreview count --park paris --location france
//! parkreview chart top-locations --park hongkong
//! parkreview export --format json --output out/summary
//! ```

use clap::Parser;
use parkreview::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // PARKREVIEW_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PARKREVIEW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "parkreview=debug,parkreview_core=debug"
    } else {
        "parkreview=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // stdout carries menu and command output; logs go to stderr.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("  Park Reviews Analysis System v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", rule);
    println!();
}
