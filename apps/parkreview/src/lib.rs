//! # parkreview
//!
//! Library half of the parkreview binary: configuration, the clap command
//! set, and the interactive menu. The aggregation engine lives in
//! `parkreview-core`.

pub mod cli;
pub mod config;
pub mod menu;

pub use parkreview_core;
