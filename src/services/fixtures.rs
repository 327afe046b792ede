//! Season results extraction, grouped by tour.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{Fixture, FixturesSelectors, Tours};
use crate::services::document::{NodeQuery, parse_selector, root};
use crate::services::probe::probe;

/// Position of the home side among a game's team nodes.
const HOME: usize = 1;
/// Position of the away side among a game's team nodes.
const AWAY: usize = 2;

/// Reads the results page of a season.
pub struct FixturesExtractor {
    block: Selector,
    tour_title: Selector,
    game: Selector,
    kickoff: Selector,
    team_name: Selector,
    emblem: Selector,
    score: Selector,
    cancelled_markers: Vec<String>,
}

impl FixturesExtractor {
    /// Build an extractor; `cancelled_markers` are compared case-insensitively
    /// against the kickoff text.
    pub fn new(selectors: &FixturesSelectors, cancelled_markers: &[String]) -> Result<Self> {
        Ok(Self {
            block: parse_selector(&selectors.block)?,
            tour_title: parse_selector(&selectors.tour_title)?,
            game: parse_selector(&selectors.game)?,
            kickoff: parse_selector(&selectors.kickoff)?,
            team_name: parse_selector(&selectors.team_name)?,
            emblem: parse_selector(&selectors.emblem)?,
            score: parse_selector(&selectors.score)?,
            cancelled_markers: cancelled_markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .collect(),
        })
    }

    /// Extract every tour's completed and scheduled fixtures in page order.
    pub fn extract(&self, document: &Html) -> Tours {
        let scope = root(document);
        let mut tours = Tours::new();

        for (position, block) in probe(|b| scope.nth(&self.block, b)) {
            let tour = block.nth_text(&self.tour_title, 1).unwrap_or_else(|| {
                log::debug!("Results block {position} has no tour title");
                String::new()
            });

            let games: Vec<Fixture> = probe(|g| block.nth(&self.game, g))
                .filter_map(|(_, game)| self.read_game(game))
                .collect();

            tours.append(tour, games);
        }
        tours
    }

    /// Read one game; `None` when it was abandoned or cancelled.
    fn read_game(&self, game: ElementRef<'_>) -> Option<Fixture> {
        let kickoff_time = game.nth_text(&self.kickoff, 1).unwrap_or_default();
        if self.is_cancelled(&kickoff_time) {
            log::debug!("Skipping cancelled game: {kickoff_time}");
            return None;
        }

        Some(Fixture {
            kickoff_time,
            home_emblem_url: game.nth_attr(&self.emblem, HOME, "src").unwrap_or_default(),
            home_team_name: game.nth_text(&self.team_name, HOME).unwrap_or_default(),
            home_score: game.nth_text(&self.score, HOME).unwrap_or_default(),
            away_score: game.nth_text(&self.score, AWAY).unwrap_or_default(),
            away_emblem_url: game.nth_attr(&self.emblem, AWAY, "src").unwrap_or_default(),
            away_team_name: game.nth_text(&self.team_name, AWAY).unwrap_or_default(),
        })
    }

    fn is_cancelled(&self, kickoff_time: &str) -> bool {
        let status = kickoff_time.trim().to_lowercase();
        self.cancelled_markers.iter().any(|m| *m == status)
    }
}
