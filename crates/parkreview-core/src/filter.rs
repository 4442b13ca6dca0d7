//! # Filter Module
//!
//! Case-insensitive fragment matching for user-typed park and location names.
//!
//! Visitors type "paris" or "hong", not `Disneyland_Paris`. A [`Fragment`]
//! matches any stored value that contains it, ignoring case.

use crate::ReviewError;
use std::fmt;

/// A non-empty search fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    original: String,
    needle: String,
}

impl Fragment {
    /// Create a fragment from user input.
    ///
    /// Surrounding whitespace is ignored; blank input is rejected.
    pub fn new(raw: &str) -> Result<Self, ReviewError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReviewError::InvalidInput(
                "search text must not be empty".to_string(),
            ));
        }
        Ok(Self {
            original: trimmed.to_string(),
            needle: trimmed.to_lowercase(),
        })
    }

    /// Whether `value` contains this fragment, ignoring case.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }

    /// The fragment as the user typed it (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Parse a user-typed year. Exactly four ASCII digits are accepted.
pub fn parse_year(raw: &str) -> Result<u16, ReviewError> {
    let trimmed = raw.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReviewError::InvalidInput(format!(
            "'{}' is not a four-digit year",
            trimmed
        )));
    }
    trimmed
        .parse()
        .map_err(|_| ReviewError::InvalidInput(format!("'{}' is not a four-digit year", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_substring_ignoring_case() {
        let fragment = Fragment::new("paris").expect("fragment");
        assert!(fragment.matches("Disneyland_Paris"));
        assert!(!fragment.matches("Disneyland_HongKong"));

        let fragment = Fragment::new("HONG").expect("fragment");
        assert!(fragment.matches("Disneyland_HongKong"));
    }

    #[test]
    fn keeps_trimmed_original() {
        let fragment = Fragment::new("  United Kingdom ").expect("fragment");
        assert_eq!(fragment.as_str(), "United Kingdom");
        assert_eq!(fragment.to_string(), "United Kingdom");
        assert!(fragment.matches("united kingdom"));
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(
            Fragment::new("   "),
            Err(ReviewError::InvalidInput(_))
        ));
        assert!(Fragment::new("").is_err());
    }

    #[test]
    fn year_must_be_four_digits() {
        assert_eq!(parse_year(" 2019 ").expect("year"), 2019);
        assert!(parse_year("19").is_err());
        assert!(parse_year("20190").is_err());
        assert!(parse_year("+201").is_err());
        assert!(parse_year("abcd").is_err());
    }
}
