// src/models/mod.rs

//! Domain models for the history extractor.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod competition;
mod config;
mod fixture;
mod season;
mod selectors;
mod standings;
mod top_n;

// Re-export all public types
pub use competition::{Competition, CompetitionHistory, CompetitionKind, CrawlStats};
pub use config::{Config, CrawlerConfig, LoggingConfig, SiteConfig, StorageConfig};
pub use fixture::{Fixture, Tours};
pub use season::{SEASON_LABEL_PREFIX, SeasonKey};
pub use selectors::{
    FixturesSelectors, HistorySelectors, IndexSelectors, PageSelectors, StandingsSelectors,
};
pub use standings::TeamStanding;
pub use top_n::{Podium, TOP_N, TopNEntry};
