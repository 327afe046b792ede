// src/models/competition.rs

//! Competition definitions and the per-run history they produce.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{Podium, SeasonKey, TeamStanding, Tours};

/// How a competition's history is laid out on the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionKind {
    /// Full standings table and fixtures on every season page.
    #[default]
    Standings,
    /// Only the top four per season, listed together on the history page.
    TopN,
}

/// A competition to crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// Site identifier used in `/competitions/{site_index}/`
    pub site_index: u32,

    /// Number of seasons to read from the history page
    pub season_count: usize,

    /// Human-readable name, also used for storage table names
    pub display_name: String,

    #[serde(default)]
    pub kind: CompetitionKind,

    /// Prefix season labels with [`crate::models::SEASON_LABEL_PREFIX`]
    #[serde(default)]
    pub season_label_prefix: bool,

    /// For top-N competitions, also crawl each season's fixtures
    #[serde(default)]
    pub with_fixtures: bool,
}

impl Competition {
    /// Path of the competition's history page relative to the site root.
    pub fn history_path(&self) -> String {
        format!("competitions/{}/history/", self.site_index)
    }

    /// Whether the season pages (standings and fixtures) must be crawled.
    pub fn crawls_seasons(&self) -> bool {
        match self.kind {
            CompetitionKind::Standings => true,
            CompetitionKind::TopN => self.with_fixtures,
        }
    }

    /// Name usable as a directory: lowercase, spaces replaced with `_`.
    pub fn slug(&self) -> String {
        let slug: String = self
            .display_name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}_{}", self.site_index, slug)
    }
}

/// Counters collected while crawling one competition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub seasons_processed: usize,
    pub seasons_skipped: usize,
    pub standings_rows: usize,
    pub fixtures: usize,
    pub podium_seasons: usize,
}

impl CrawlStats {
    pub fn started() -> Self {
        let now = Utc::now();
        Self {
            start_time: now,
            end_time: now,
            seasons_processed: 0,
            seasons_skipped: 0,
            standings_rows: 0,
            fixtures: 0,
            podium_seasons: 0,
        }
    }

    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Everything extracted for one competition in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionHistory {
    pub competition: Competition,
    pub standings: IndexMap<SeasonKey, Vec<TeamStanding>>,
    pub results: IndexMap<SeasonKey, Tours>,
    pub podiums: IndexMap<SeasonKey, Podium>,
    pub stats: CrawlStats,
}

impl CompetitionHistory {
    pub fn new(competition: Competition) -> Self {
        Self {
            competition,
            standings: IndexMap::new(),
            results: IndexMap::new(),
            podiums: IndexMap::new(),
            stats: CrawlStats::started(),
        }
    }

    /// Stamp the end time and recompute the row counters.
    pub fn finish(&mut self) {
        self.stats.end_time = Utc::now();
        self.stats.standings_rows = self.standings.values().map(Vec::len).sum();
        self.stats.fixtures = self.results.values().map(Tours::fixture_count).sum();
        self.stats.podium_seasons = self.podiums.len();
    }
}
