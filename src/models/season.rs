// src/models/season.rs

//! Canonical season keys.
//!
//! Season labels on the site come in several shapes ("2012/2013",
//! "Чемпионат 2015", "Special Cup"). Everything season-scoped is grouped by
//! the normalized [`SeasonKey`], which the storage layer also uses in table
//! and file names.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Word the domestic league's season labels omit compared to other competitions.
pub const SEASON_LABEL_PREFIX: &str = "Российская ";

/// One four-digit year, optionally followed by a second one after a slash.
static YEAR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d{4}(?:/\d{4})?)\b").ok());

/// Canonical identifier of a season, e.g. `2012` or `2012/2013`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonKey(String);

impl SeasonKey {
    /// Normalize a raw season label.
    ///
    /// A split-year match is kept whole, a single year is returned alone and a
    /// label without any four-digit year is kept verbatim (after the optional
    /// prefix is applied). Never fails.
    pub fn normalize(raw_label: &str, competition_requires_prefix: bool) -> Self {
        let label = if competition_requires_prefix {
            format!("{SEASON_LABEL_PREFIX}{raw_label}")
        } else {
            raw_label.to_string()
        };

        let year = YEAR_PATTERN
            .as_ref()
            .and_then(|re| re.captures(&label))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        Self(year.unwrap_or(label))
    }

    /// Normalize a label read from row `position`, substituting a positional
    /// label when the page left the cell blank.
    pub fn from_row(raw_label: Option<&str>, position: usize, requires_prefix: bool) -> Self {
        match raw_label.map(str::trim).filter(|s| !s.is_empty()) {
            Some(label) => Self::normalize(label, requires_prefix),
            None => Self(format!("season {position}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Variant of the key that is safe inside file names.
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| if c == '/' || c == '\\' { '-' } else { c })
            .collect()
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SeasonKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
