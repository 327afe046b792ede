//! Podium extraction from a competition's aggregate history page.

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{HistorySelectors, Podium, SeasonKey, TopNEntry};
use crate::services::document::{NodeQuery, parse_selector, root};
use crate::services::probe::probe;

/// Column holding the season label.
const SEASON_COLUMN: usize = 1;
/// Column of the winner; ranks 2..4 follow in the next columns.
const FIRST_RESULT_COLUMN: usize = 2;

/// Reads the top four of every season listed on a history page.
pub struct TopNExtractor {
    row: Selector,
    cell: Selector,
    season_label: Selector,
    emblem: Selector,
    team_name: Selector,
}

impl TopNExtractor {
    pub fn new(selectors: &HistorySelectors) -> Result<Self> {
        Ok(Self {
            row: parse_selector(&selectors.row)?,
            cell: parse_selector(&selectors.cell)?,
            season_label: parse_selector(&selectors.season_label)?,
            emblem: parse_selector(&selectors.emblem)?,
            team_name: parse_selector(&selectors.team_name)?,
        })
    }

    /// Extract podiums for the first `season_count` rows.
    ///
    /// Every returned season has exactly four entries; missing ranks are
    /// placeholders.
    pub fn extract(&self, document: &Html, season_count: usize) -> IndexMap<SeasonKey, Podium> {
        let scope = root(document);
        let mut podiums = IndexMap::new();

        for (position, row) in probe(|r| scope.nth(&self.row, r)).take(season_count) {
            let raw_label = row.nth(&self.cell, SEASON_COLUMN).and_then(|cell| {
                cell.nth_text(&self.season_label, 1)
                    .or_else(|| cell.full_text())
            });
            let season = SeasonKey::from_row(raw_label.as_deref(), position, false);
            if podiums.contains_key(&season) {
                log::warn!("Season {season} listed twice on history page; keeping the first row");
                continue;
            }

            let podium: Podium =
                std::array::from_fn(|rank| self.read_entry(row, FIRST_RESULT_COLUMN + rank));
            podiums.insert(season, podium);
        }

        if podiums.len() < season_count {
            log::debug!(
                "History page lists {} of {} requested seasons",
                podiums.len(),
                season_count
            );
        }
        podiums
    }

    fn read_entry(&self, row: ElementRef<'_>, column: usize) -> TopNEntry {
        let Some(cell) = row.nth(&self.cell, column) else {
            return TopNEntry::placeholder();
        };
        match (
            cell.nth_attr(&self.emblem, 1, "src"),
            cell.nth_text(&self.team_name, 1),
        ) {
            (Some(emblem), Some(name)) => TopNEntry::new(emblem, name),
            _ => TopNEntry::placeholder(),
        }
    }
}
