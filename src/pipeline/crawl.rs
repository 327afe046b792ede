// src/pipeline/crawl.rs

//! History crawling pipeline.

use crate::error::Result;
use crate::models::{Competition, Config};
use crate::pipeline::CompetitionCrawler;
use crate::storage::{HistoryStorage, WriteSummary};
use crate::utils::http::DocumentFetcher;
use crate::utils::log as report;

/// Crawl each competition in turn and persist its history.
///
/// Competitions run sequentially; the first failure aborts the run.
pub async fn run_crawler(
    config: &Config,
    fetcher: &dyn DocumentFetcher,
    storage: &dyn HistoryStorage,
    competitions: &[Competition],
) -> Result<Vec<WriteSummary>> {
    report::header("Soccer history crawl");
    log::info!(
        "{} competitions, {} backend",
        competitions.len(),
        storage.name()
    );

    let crawler = CompetitionCrawler::new(config, fetcher)?;
    let mut summaries = Vec::with_capacity(competitions.len());

    for (i, competition) in competitions.iter().enumerate() {
        report::step(
            i + 1,
            competitions.len(),
            &format!(
                "{} (#{}, {} seasons)",
                competition.display_name, competition.site_index, competition.season_count
            ),
        );

        let history = crawler.crawl(competition).await?;
        let summary = storage.write_history(&history).await?;

        let stats = &history.stats;
        report::summary(
            &competition.display_name,
            &[
                ("seasons", stats.seasons_processed.to_string()),
                ("skipped", stats.seasons_skipped.to_string()),
                ("standings rows", stats.standings_rows.to_string()),
                ("fixtures", stats.fixtures.to_string()),
                ("podium seasons", stats.podium_seasons.to_string()),
                ("elapsed", format!("{}s", stats.elapsed_secs())),
                ("stored at", summary.location.clone()),
            ],
        );
        summaries.push(summary);
    }

    log::info!(
        "Crawl complete: {} tables, {} rows",
        summaries.iter().map(|s| s.tables_written).sum::<usize>(),
        summaries.iter().map(|s| s.rows_written).sum::<usize>()
    );
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompetitionKind;
    use crate::storage::LocalStorage;
    use crate::utils::http::StaticFetcher;

    fn world_cup() -> Competition {
        Competition {
            site_index: 742,
            season_count: 2,
            display_name: "чемпионат мира".to_string(),
            kind: CompetitionKind::TopN,
            season_label_prefix: false,
            with_fixtures: false,
        }
    }

    const HISTORY: &str = r#"<table id="history"><tbody>
        <tr><td><span>2022</span></td>
            <td><img src="/ar.png"><span><a>Аргентина</a></span></td></tr>
        <tr><td><span>2018</span></td>
            <td><img src="/fr.png"><span><a>Франция</a></span></td></tr>
    </tbody></table>"#;

    #[tokio::test]
    async fn test_run_writes_every_competition() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let fetcher = StaticFetcher::new()
            .with_page("https://soccer365.ru/competitions/742/history/", HISTORY);
        let mut config = Config::default();
        config.competitions = vec![world_cup()];

        let summaries = run_crawler(&config, &fetcher, &storage, &config.competitions)
            .await
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].rows_written, 2);
        assert!(tmp.path().join("742_чемпионат_мира/podium.json").exists());
    }

    #[tokio::test]
    async fn test_run_stops_on_fetch_error() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let fetcher = StaticFetcher::new();
        let config = Config::default();

        let result = run_crawler(&config, &fetcher, &storage, &[world_cup()]).await;
        assert!(result.is_err());
    }
}
