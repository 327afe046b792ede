//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── {site_index}_{name}/
//!     ├── summary.json          # CrawlStats of the last run
//!     ├── podium.json           # Top-N competitions only
//!     ├── standings/
//!     │   └── {season}.json
//!     └── results/
//!         └── {season}.json
//! ```
//!
//! Season file names replace `/` with `-` (`2012/2013` → `2012-2013.json`).
//! Every file is written atomically (temp file, then rename).

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CompetitionHistory, CrawlStats};
use crate::storage::{HistoryStorage, PodiumRow, ResultRow, WriteSummary};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read JSON data, returning None if the file doesn't exist.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Stats of the last run stored for a competition directory.
    pub async fn load_summary(&self, slug: &str) -> Result<Option<CrawlStats>> {
        self.read_json(&format!("{slug}/summary.json")).await
    }
}

#[async_trait]
impl HistoryStorage for LocalStorage {
    async fn write_history(&self, history: &CompetitionHistory) -> Result<WriteSummary> {
        let slug = history.competition.slug();
        let mut files = 0;
        let mut rows = 0;

        for (season, standings) in &history.standings {
            let key = format!("{slug}/standings/{}.json", season.file_stem());
            self.write_json(&key, standings).await?;
            files += 1;
            rows += standings.len();
        }

        for (season, tours) in &history.results {
            let key = format!("{slug}/results/{}.json", season.file_stem());
            let results = ResultRow::from_tours(tours);
            self.write_json(&key, &results).await?;
            files += 1;
            rows += results.len();
        }

        if !history.podiums.is_empty() {
            let podium: Vec<PodiumRow> = history
                .podiums
                .iter()
                .map(|(season, podium)| PodiumRow::new(season, podium))
                .collect();
            self.write_json(&format!("{slug}/podium.json"), &podium).await?;
            files += 1;
            rows += podium.len();
        }

        self.write_json(&format!("{slug}/summary.json"), &history.stats)
            .await?;

        log::info!(
            "Wrote {} files ({} rows) to {}",
            files,
            rows,
            self.path(&slug).display()
        );

        Ok(WriteSummary {
            competition: history.competition.display_name.clone(),
            location: self.path(&slug).display().to_string(),
            tables_written: files,
            rows_written: rows,
            timestamp: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Competition, CompetitionKind, Fixture, SeasonKey, TeamStanding, TopNEntry, Tours,
    };

    fn competition(kind: CompetitionKind) -> Competition {
        Competition {
            site_index: 13,
            season_count: 2,
            display_name: "российская премьер лига".to_string(),
            kind,
            season_label_prefix: true,
            with_fixtures: false,
        }
    }

    fn standings_history() -> CompetitionHistory {
        let mut history = CompetitionHistory::new(competition(CompetitionKind::Standings));
        let season = SeasonKey::normalize("2012/2013", false);
        let team = TeamStanding {
            team_name: "Зенит".into(),
            points: "65".into(),
            ..TeamStanding::default()
        };
        history.standings.insert(season.clone(), vec![team.clone(), team]);

        let mut tours = Tours::new();
        tours.append("1 тур", vec![Fixture::default(), Fixture::default()]);
        history.results.insert(season, tours);
        history.finish();
        history
    }

    #[tokio::test]
    async fn test_write_standings_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let history = standings_history();

        let summary = storage.write_history(&history).await.unwrap();

        assert_eq!(summary.tables_written, 2);
        assert_eq!(summary.rows_written, 4);

        let slug = history.competition.slug();
        let standings: Vec<TeamStanding> = storage
            .read_json(&format!("{slug}/standings/2012-2013.json"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(standings[0].team_name, "Зенит");

        let results: Vec<serde_json::Value> = storage
            .read_json(&format!("{slug}/results/2012-2013.json"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["tour"], "1 тур");

        assert!(!tmp.path().join(&slug).join("podium.json").exists());
        let stats = storage.load_summary(&slug).await.unwrap().unwrap();
        assert_eq!(stats.standings_rows, 2);
    }

    #[tokio::test]
    async fn test_write_podium() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let mut history = CompetitionHistory::new(competition(CompetitionKind::TopN));
        history.podiums.insert(
            SeasonKey::normalize("2018", false),
            [
                TopNEntry::new("/fr.png", "Франция"),
                TopNEntry::new("/hr.png", "Хорватия"),
                TopNEntry::new("/be.png", "Бельгия"),
                TopNEntry::new("/en.png", "Англия"),
            ],
        );
        history.finish();

        let summary = storage.write_history(&history).await.unwrap();
        assert_eq!(summary.tables_written, 1);

        let podium: Vec<serde_json::Value> = storage
            .read_json(&format!("{}/podium.json", history.competition.slug()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(podium[0]["season"], "2018");
        assert_eq!(podium[0]["places"][1][0], "Хорватия");
    }

    #[tokio::test]
    async fn test_rewrite_replaces_files() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let mut history = standings_history();
        storage.write_history(&history).await.unwrap();

        history.standings.values_mut().for_each(|rows| rows.truncate(1));
        storage.write_history(&history).await.unwrap();

        let standings: Vec<TeamStanding> = storage
            .read_json(&format!(
                "{}/standings/2012-2013.json",
                history.competition.slug()
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(standings.len(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.load_summary("nothing").await.unwrap().is_none());
    }
}
