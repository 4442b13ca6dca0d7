//! # Configuration
//!
//! Settings are layered, highest priority first:
//!
//! 1. Command-line flags (`--data`, `--strict`)
//! 2. `PARKREVIEW_DATA` environment variable (data path only)
//! 3. TOML file (`--config <path>`, or `parkreview.toml` in the working directory)
//! 4. Built-in defaults
//!
//! ```toml
//! data_path = "data/disneyland_reviews.csv"
//! strict = false
//! export_dir = "exports"
//! export_basename = "park_reviews_summary"
//! chart_width = 50
//! top_n = 10
//! location_preview = 5
//! ```

use parkreview_core::primitives::{
    DEFAULT_CHART_WIDTH, DEFAULT_EXPORT_BASENAME, DEFAULT_LOCATION_PREVIEW, DEFAULT_TOP_N,
};
use parkreview_core::{LoadPolicy, ReviewError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "parkreview.toml";

/// Environment variable overriding the data path.
pub const DATA_ENV_VAR: &str = "PARKREVIEW_DATA";

/// Data file used when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/disneyland_reviews.csv";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Review CSV to load at startup.
    pub data_path: PathBuf,
    /// Fail on the first malformed row instead of skipping it.
    pub strict: bool,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
    /// Export file name without extension.
    pub export_basename: String,
    /// Chart width in character cells.
    pub chart_width: usize,
    /// Number of locations in the top-locations chart.
    pub top_n: usize,
    /// Locations listed per park before "... and N more".
    pub location_preview: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            strict: false,
            export_dir: PathBuf::from("."),
            export_basename: DEFAULT_EXPORT_BASENAME.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            top_n: DEFAULT_TOP_N,
            location_preview: DEFAULT_LOCATION_PREVIEW,
        }
    }
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--data` flag.
    pub data_path: Option<PathBuf>,
    /// Value of `PARKREVIEW_DATA`, if set.
    pub env_data_path: Option<String>,
    /// `--strict` flag.
    pub strict: bool,
}

impl Overrides {
    /// Overrides from CLI values plus the process environment.
    #[must_use]
    pub fn from_env(data_path: Option<PathBuf>, strict: bool) -> Self {
        Self {
            data_path,
            env_data_path: std::env::var(DATA_ENV_VAR).ok(),
            strict,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ReviewError> {
        let config: Config = toml::from_str(text).map_err(|e| ReviewError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load_file(path: &Path) -> Result<Self, ReviewError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ReviewError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ReviewError::Config(format!(
                "'{}' is larger than {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            ReviewError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            ReviewError::Config(msg) => {
                ReviewError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Locate and read the config file.
    ///
    /// An explicit path must exist. Without one, `parkreview.toml` in the
    /// working directory is used if present; otherwise defaults apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ReviewError> {
        match explicit {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_file(path)
            }
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!("Loading config from {}", DEFAULT_CONFIG_FILE);
                    Self::load_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply flag and environment overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.data_path {
            self.data_path = path;
        } else if let Some(env) = overrides.env_data_path.filter(|v| !v.trim().is_empty()) {
            self.data_path = PathBuf::from(env.trim());
        }
        if overrides.strict {
            self.strict = true;
        }
        self
    }

    /// Reject settings no command can work with.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.top_n == 0 {
            return Err(ReviewError::Config("top_n must be at least 1".to_string()));
        }
        if self.location_preview == 0 {
            return Err(ReviewError::Config(
                "location_preview must be at least 1".to_string(),
            ));
        }
        if self.export_basename.trim().is_empty() {
            return Err(ReviewError::Config(
                "export_basename must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Row handling policy for the loader.
    #[must_use]
    pub fn load_policy(&self) -> LoadPolicy {
        if self.strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Lenient
        }
    }

    /// Default export target (directory + base name, no extension).
    #[must_use]
    pub fn export_target(&self) -> PathBuf {
        self.export_dir.join(&self.export_basename)
    }
}

// =============================================================================
// TESTS
// =============================================================================
