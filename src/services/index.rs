//! Season links on a competition's history page.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{Competition, IndexSelectors, SeasonKey};
use crate::services::document::{NodeQuery, parse_selector, root};
use crate::services::probe::probe;

/// Position of the results ("Календарь") tab among a season page's tabs.
const RESULTS_TAB_POSITION: usize = 2;

/// One season row of the history page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonLink {
    /// 1-based row position on the history page
    pub position: usize,
    pub key: SeasonKey,
    /// Link to the season page, as written in the markup
    pub href: Option<String>,
}

/// Reads season rows from the history page and the results tab from a
/// season page.
pub struct SeasonIndexReader {
    season_row: Selector,
    season_label: Selector,
    season_link: Selector,
    results_tab: Selector,
    results_tab_link: Selector,
}

impl SeasonIndexReader {
    pub fn new(selectors: &IndexSelectors) -> Result<Self> {
        Ok(Self {
            season_row: parse_selector(&selectors.season_row)?,
            season_label: parse_selector(&selectors.season_label)?,
            season_link: parse_selector(&selectors.season_link)?,
            results_tab: parse_selector(&selectors.results_tab)?,
            results_tab_link: parse_selector(&selectors.results_tab_link)?,
        })
    }

    /// Up to `competition.season_count` seasons, newest first as listed.
    pub fn seasons(&self, document: &Html, competition: &Competition) -> Vec<SeasonLink> {
        let scope = root(document);
        probe(|r| scope.nth(&self.season_row, r))
            .take(competition.season_count)
            .map(|(position, row)| {
                let label = row.nth_text(&self.season_label, 1);
                SeasonLink {
                    position,
                    key: SeasonKey::from_row(
                        label.as_deref(),
                        position,
                        competition.season_label_prefix,
                    ),
                    href: row.nth_attr(&self.season_link, 1, "href"),
                }
            })
            .collect()
    }

    /// Link to the season's results page, read from its second tab.
    pub fn results_link(&self, season_document: &Html) -> Option<String> {
        let scope = root(season_document);
        scope
            .nth(&self.results_tab, RESULTS_TAB_POSITION)
            .and_then(|tab| tab.nth_attr(&self.results_tab_link, 1, "href"))
    }
}
