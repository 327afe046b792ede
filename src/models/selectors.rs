// src/models/selectors.rs

//! CSS selectors for every page shape the extractor reads.
//!
//! Selectors are plain strings here so they can be overridden from
//! `config.toml`; each extractor compiles its own group in its `new`.
//! Omitted keys keep the defaults below.

use serde::{Deserialize, Serialize};

/// Selectors grouped by page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSelectors {
    #[serde(default)]
    pub index: IndexSelectors,

    #[serde(default)]
    pub standings: StandingsSelectors,

    #[serde(default)]
    pub fixtures: FixturesSelectors,

    #[serde(default)]
    pub history: HistorySelectors,
}

impl PageSelectors {
    /// Every selector string with a dotted name, for validation messages.
    pub fn all(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("index.season_row", &self.index.season_row),
            ("index.season_label", &self.index.season_label),
            ("index.season_link", &self.index.season_link),
            ("index.results_tab", &self.index.results_tab),
            ("index.results_tab_link", &self.index.results_tab_link),
            ("standings.row", &self.standings.row),
            ("standings.emblem", &self.standings.emblem),
            ("standings.cell", &self.standings.cell),
            ("standings.team_name", &self.standings.team_name),
            ("standings.points_bold", &self.standings.points_bold),
            ("standings.points_plain", &self.standings.points_plain),
            ("fixtures.block", &self.fixtures.block),
            ("fixtures.tour_title", &self.fixtures.tour_title),
            ("fixtures.game", &self.fixtures.game),
            ("fixtures.kickoff", &self.fixtures.kickoff),
            ("fixtures.team_name", &self.fixtures.team_name),
            ("fixtures.emblem", &self.fixtures.emblem),
            ("fixtures.score", &self.fixtures.score),
            ("history.row", &self.history.row),
            ("history.cell", &self.history.cell),
            ("history.season_label", &self.history.season_label),
            ("history.emblem", &self.history.emblem),
            ("history.team_name", &self.history.team_name),
        ]
    }
}

/// Competition history page: one row per season linking to the season page.
/// The results tab lives on the season page and points at its fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSelectors {
    pub season_row: String,
    pub season_label: String,
    pub season_link: String,
    pub results_tab: String,
    pub results_tab_link: String,
}

impl Default for IndexSelectors {
    fn default() -> Self {
        Self {
            season_row: "div.page_main_content.w700 tbody tr".to_string(),
            season_label: "a span".to_string(),
            season_link: "a[href]".to_string(),
            results_tab: "span.tabs_item".to_string(),
            results_tab_link: "a[href]".to_string(),
        }
    }
}

/// Season standings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingsSelectors {
    pub row: String,
    pub emblem: String,
    pub cell: String,
    pub team_name: String,
    pub points_bold: String,
    pub points_plain: String,
}

impl Default for StandingsSelectors {
    fn default() -> Self {
        Self {
            row: "table.tablesorter.stngs tbody tr".to_string(),
            emblem: "table.tablesorter.stngs tbody img:first-of-type".to_string(),
            cell: "td".to_string(),
            team_name: "td span a".to_string(),
            points_bold: "td > b".to_string(),
            points_plain: "td > span".to_string(),
        }
    }
}

/// Season results page: blocks of games, one block per tour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesSelectors {
    pub block: String,
    pub tour_title: String,
    pub game: String,
    pub kickoff: String,
    pub team_name: String,
    pub emblem: String,
    pub score: String,
}

impl Default for FixturesSelectors {
    fn default() -> Self {
        Self {
            block: "div.live_comptt_bd".to_string(),
            tour_title: "div.cmp_stg_ttl".to_string(),
            game: "div.game_block".to_string(),
            kickoff: "span[class*=\"size\"]".to_string(),
            team_name: "div.img16 > span".to_string(),
            emblem: "img[src]".to_string(),
            score: "div.gls".to_string(),
        }
    }
}

/// Aggregate history page of a top-N competition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySelectors {
    pub row: String,
    pub cell: String,
    pub season_label: String,
    pub emblem: String,
    pub team_name: String,
}

impl Default for HistorySelectors {
    fn default() -> Self {
        Self {
            row: "tbody tr".to_string(),
            cell: "td".to_string(),
            season_label: "span".to_string(),
            emblem: "img[src]".to_string(),
            team_name: "span > a".to_string(),
        }
    }
}
