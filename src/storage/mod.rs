//! Storage backends for extracted competition history.
//!
//! Every backend receives one [`CompetitionHistory`] at a time and owns its
//! own layout. The tabular shapes below are shared so that the JSON and SQL
//! backends agree on column order:
//!
//! ```text
//! "{name} {season}_таблица"            standings, one per season
//! "{name} {season}_результаты_туров"   results, one per season
//! "{name}"                              podiums, one per top-N competition
//! ```

pub mod local;
#[cfg(feature = "mysql")]
pub mod mysql;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::{CompetitionHistory, Podium, SeasonKey, TOP_N, Tours};

pub use local::LocalStorage;
#[cfg(feature = "mysql")]
pub use mysql::MySqlStorage;

/// Standings table columns, in [`crate::models::TeamStanding::fields`] order.
pub const STANDINGS_COLUMNS: [&str; 10] = [
    "эмблема_команды",
    "название_команды",
    "игры",
    "победы",
    "ничьи",
    "поражения",
    "забитые_мячи",
    "пропущенные_мячи",
    "разница",
    "очки",
];

/// Results table columns, in [`ResultRow::values`] order.
pub const RESULTS_COLUMNS: [&str; 7] = [
    "тур",
    "дата",
    "первая_команда",
    "эмблема_первой_команды",
    "вторая_команда",
    "эмблема_второй_команды",
    "счет",
];

/// Podium table columns, in [`PodiumRow::values`] order.
pub const PODIUM_COLUMNS: [&str; 1 + 2 * TOP_N] = [
    "соревнование",
    "первое_место",
    "эмблема_первого_места",
    "второе_место",
    "эмблема_второго_места",
    "третье_место",
    "эмблема_третьего_места",
    "четвертое_место",
    "эмблема_четвертого_места",
];

/// Table holding a season's standings.
pub fn standings_table(display_name: &str, season: &SeasonKey) -> String {
    format!("{display_name} {season}_таблица")
}

/// Table holding a season's results.
pub fn results_table(display_name: &str, season: &SeasonKey) -> String {
    format!("{display_name} {season}_результаты_туров")
}

/// Table holding a competition's podiums.
pub fn podium_table(display_name: &str) -> String {
    display_name.to_string()
}

/// One row of a results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub tour: String,
    pub date: String,
    pub home_team: String,
    pub home_emblem: String,
    pub away_team: String,
    pub away_emblem: String,
    pub score: String,
}

impl ResultRow {
    /// Flatten tours into rows, tours in page order.
    pub fn from_tours(tours: &Tours) -> Vec<Self> {
        tours
            .iter()
            .flat_map(|(tour, fixtures)| {
                fixtures.iter().map(move |f| Self {
                    tour: tour.to_string(),
                    date: f.kickoff_time.clone(),
                    home_team: f.home_team_name.clone(),
                    home_emblem: f.home_emblem_url.clone(),
                    away_team: f.away_team_name.clone(),
                    away_emblem: f.away_emblem_url.clone(),
                    score: f.score(),
                })
            })
            .collect()
    }

    pub fn values(&self) -> [&str; 7] {
        [
            &self.tour,
            &self.date,
            &self.home_team,
            &self.home_emblem,
            &self.away_team,
            &self.away_emblem,
            &self.score,
        ]
    }
}

/// One row of a podium table: season, then name and emblem per rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodiumRow {
    pub season: String,
    pub places: Vec<(String, String)>,
}

impl PodiumRow {
    pub fn new(season: &SeasonKey, podium: &Podium) -> Self {
        Self {
            season: season.to_string(),
            places: podium
                .iter()
                .map(|entry| (entry.team_name.clone(), entry.emblem_url.clone()))
                .collect(),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        std::iter::once(self.season.as_str())
            .chain(
                self.places
                    .iter()
                    .flat_map(|(name, emblem)| [name.as_str(), emblem.as_str()]),
            )
            .collect()
    }
}

/// Result of persisting one competition.
#[derive(Debug, Clone, Serialize)]
pub struct WriteSummary {
    /// Competition display name
    pub competition: String,
    /// Where the data went (directory or database)
    pub location: String,
    /// Files or tables written
    pub tables_written: usize,
    /// Data rows written across all tables
    pub rows_written: usize,
    pub timestamp: DateTime<Utc>,
}

/// Trait for history storage backends.
#[async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Persist everything extracted for one competition.
    async fn write_history(&self, history: &CompetitionHistory) -> Result<WriteSummary>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fixture, TopNEntry};

    #[test]
    fn test_table_names() {
        let season = SeasonKey::normalize("2012/2013", false);
        assert_eq!(
            standings_table("российская премьер лига", &season),
            "российская премьер лига 2012/2013_таблица"
        );
        assert_eq!(
            results_table("чемпионат мира", &SeasonKey::normalize("2018", false)),
            "чемпионат мира 2018_результаты_туров"
        );
        assert_eq!(podium_table("чемпионат европы"), "чемпионат европы");
    }

    #[test]
    fn test_result_rows_follow_tour_order() {
        let mut tours = Tours::new();
        tours.append(
            "1 тур",
            vec![Fixture {
                kickoff_time: "12.08, 19:00".into(),
                home_team_name: "Зенит".into(),
                home_emblem_url: "/z.png".into(),
                home_score: "2".into(),
                away_score: "1".into(),
                away_team_name: "Спартак".into(),
                away_emblem_url: "/s.png".into(),
            }],
        );
        tours.append("2 тур", vec![Fixture::default()]);

        let rows = ResultRow::from_tours(&tours);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].values(),
            ["1 тур", "12.08, 19:00", "Зенит", "/z.png", "Спартак", "/s.png", "2 1"]
        );
        assert_eq!(rows[1].tour, "2 тур");
        assert_eq!(rows[1].score, " ");
    }

    #[test]
    fn test_podium_row_width() {
        let podium: Podium = [
            TopNEntry::new("/1.png", "Франция"),
            TopNEntry::new("/2.png", "Хорватия"),
            TopNEntry::placeholder(),
            TopNEntry::placeholder(),
        ];
        let row = PodiumRow::new(&SeasonKey::normalize("2018", false), &podium);
        let values = row.values();

        assert_eq!(values.len(), PODIUM_COLUMNS.len());
        assert_eq!(&values[..5], ["2018", "Франция", "/1.png", "Хорватия", "/2.png"]);
    }
}
