//! Competition crawler: history page → seasons → {standings, results}.

use indexmap::IndexMap;
use url::Url;

use crate::error::Result;
use crate::models::{Competition, CompetitionHistory, CompetitionKind, Config, Tours};
use crate::services::{
    FixturesExtractor, SeasonIndexReader, SeasonLink, StandingsExtractor, TopNExtractor,
};
use crate::utils::http::{DocumentFetcher, read_document};
use crate::utils::resolve_url;

/// Walks one competition's pages and collects everything they list.
///
/// Pages are fetched one at a time; a fetch failure aborts the crawl.
pub struct CompetitionCrawler<'a> {
    fetcher: &'a dyn DocumentFetcher,
    base_url: Url,
    index: SeasonIndexReader,
    standings: StandingsExtractor,
    fixtures: FixturesExtractor,
    top_n: TopNExtractor,
    show_progress: bool,
}

impl<'a> CompetitionCrawler<'a> {
    /// Compile every configured selector up front.
    pub fn new(config: &Config, fetcher: &'a dyn DocumentFetcher) -> Result<Self> {
        Ok(Self {
            fetcher,
            base_url: Url::parse(&config.site.base_url)?,
            index: SeasonIndexReader::new(&config.selectors.index)?,
            standings: StandingsExtractor::new(&config.selectors.standings)?,
            fixtures: FixturesExtractor::new(
                &config.selectors.fixtures,
                &config.site.cancelled_markers,
            )?,
            top_n: TopNExtractor::new(&config.selectors.history)?,
            show_progress: config.logging.show_progress,
        })
    }

    fn url(&self, href: &str) -> String {
        resolve_url(&self.base_url, href)
    }

    /// Crawl a competition's history.
    ///
    /// Standings competitions visit every season page. Top-N competitions
    /// read their podiums from the history page and visit season pages only
    /// when `with_fixtures` is set.
    pub async fn crawl(&self, competition: &Competition) -> Result<CompetitionHistory> {
        let mut history = CompetitionHistory::new(competition.clone());
        let index_url = self.url(&competition.history_path());
        log::info!(
            "Crawling {} (#{}) from {}",
            competition.display_name,
            competition.site_index,
            index_url
        );

        let (podiums, seasons) = read_document(self.fetcher, &index_url, |document| {
            let podiums = match competition.kind {
                CompetitionKind::TopN => self.top_n.extract(document, competition.season_count),
                CompetitionKind::Standings => IndexMap::new(),
            };
            let seasons = if competition.crawls_seasons() {
                self.index.seasons(document, competition)
            } else {
                Vec::new()
            };
            (podiums, seasons)
        })
        .await?;

        history.podiums = podiums;
        if competition.crawls_seasons() && seasons.len() < competition.season_count {
            log::warn!(
                "{} lists {} of {} requested seasons",
                competition.display_name,
                seasons.len(),
                competition.season_count
            );
        }

        let total = seasons.len();
        for season in seasons {
            self.crawl_season(competition, season, total, &mut history)
                .await?;
        }

        history.finish();
        Ok(history)
    }

    async fn crawl_season(
        &self,
        competition: &Competition,
        season: SeasonLink,
        total: usize,
        history: &mut CompetitionHistory,
    ) -> Result<()> {
        let Some(href) = season.href.as_deref() else {
            log::warn!(
                "Season row {} ({}) has no link, skipping",
                season.position,
                season.key
            );
            history.stats.seasons_skipped += 1;
            return Ok(());
        };

        if self.show_progress {
            log::info!(
                "[{}/{}] {} {}",
                season.position,
                total,
                competition.display_name,
                season.key
            );
        }

        let wants_standings = competition.kind == CompetitionKind::Standings;
        let (standings, results_href) = read_document(self.fetcher, &self.url(href), |document| {
            let standings = wants_standings.then(|| self.standings.extract(document));
            (standings, self.index.results_link(document))
        })
        .await?;

        if let Some(standings) = standings {
            if standings.is_empty() {
                log::debug!("No standings rows for {}", season.key);
            }
            if history
                .standings
                .insert(season.key.clone(), standings)
                .is_some()
            {
                log::warn!("Season {} listed twice; keeping the later row", season.key);
            }
        }

        let tours = match results_href {
            Some(results_href) => {
                read_document(self.fetcher, &self.url(&results_href), |document| {
                    self.fixtures.extract(document)
                })
                .await?
            }
            None => {
                log::warn!("Season {} has no results tab", season.key);
                Tours::new()
            }
        };
        log::debug!(
            "{}: {} tours, {} fixtures",
            season.key,
            tours.len(),
            tours.fixture_count()
        );
        history.results.insert(season.key, tours);
        history.stats.seasons_processed += 1;
        Ok(())
    }
}
