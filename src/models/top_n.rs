// src/models/top_n.rs

//! Podium entries for competitions tracked only by their top finishers.

use serde::{Deserialize, Serialize};

/// Number of ranked teams kept per season.
pub const TOP_N: usize = 4;

/// One ranked team in a season's podium.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopNEntry {
    pub emblem_url: String,
    pub team_name: String,
}

impl TopNEntry {
    pub fn new(emblem_url: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            emblem_url: emblem_url.into(),
            team_name: team_name.into(),
        }
    }

    /// Empty entry used when the page has no team for a rank.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.emblem_url.is_empty() && self.team_name.is_empty()
    }
}

/// The top four of one season, rank 1 first.
pub type Podium = [TopNEntry; TOP_N];
