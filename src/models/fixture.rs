// src/models/fixture.rs

//! Match results grouped by tour (matchday).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single match as listed on a season's results page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub kickoff_time: String,
    pub home_emblem_url: String,
    pub home_team_name: String,
    pub home_score: String,
    pub away_score: String,
    pub away_emblem_url: String,
    pub away_team_name: String,
}

impl Fixture {
    /// Score as stored in the results table (`"2 1"`).
    pub fn score(&self) -> String {
        format!("{} {}", self.home_score, self.away_score)
    }
}

/// Fixtures of a season keyed by tour label, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tours(IndexMap<String, Vec<Fixture>>);

impl Tours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fixtures to a tour; a repeated label accumulates.
    pub fn append(&mut self, label: impl Into<String>, fixtures: Vec<Fixture>) {
        self.0.entry(label.into()).or_default().extend(fixtures);
    }

    pub fn get(&self, label: &str) -> Option<&[Fixture]> {
        self.0.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Fixture])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of distinct tours.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total fixtures across all tours.
    pub fn fixture_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}
