//! Season standings extraction.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{StandingsSelectors, TeamStanding};
use crate::services::document::{NodeQuery, first_present, parse_selector, root};
use crate::services::probe::probe;

/// Reads the ranked standings table of a season page.
pub struct StandingsExtractor {
    row: Selector,
    emblem: Selector,
    cell: Selector,
    team_name: Selector,
    points_bold: Selector,
    points_plain: Selector,
}

impl StandingsExtractor {
    pub fn new(selectors: &StandingsSelectors) -> Result<Self> {
        Ok(Self {
            row: parse_selector(&selectors.row)?,
            emblem: parse_selector(&selectors.emblem)?,
            cell: parse_selector(&selectors.cell)?,
            team_name: parse_selector(&selectors.team_name)?,
            points_bold: parse_selector(&selectors.points_bold)?,
            points_plain: parse_selector(&selectors.points_plain)?,
        })
    }

    /// Extract standings in rank order.
    ///
    /// Every ranked team has an emblem, so the emblem count bounds the rows
    /// read; reading also stops at the first rank without a row.
    pub fn extract(&self, document: &Html) -> Vec<TeamStanding> {
        let scope = root(document);
        let emblems: Vec<String> = scope
            .select(&self.emblem)
            .map(|img| img.value().attr("src").unwrap_or("").trim().to_string())
            .collect();

        let standings: Vec<TeamStanding> = probe(|rank| self.row_at(&scope, rank))
            .zip(&emblems)
            .map(|((_, row), emblem)| self.read_row(row, emblem.clone()))
            .collect();

        if standings.len() < emblems.len() {
            log::debug!(
                "Standings truncated: {} rows for {} emblems",
                standings.len(),
                emblems.len()
            );
        }
        standings
    }

    /// Row for `rank`, present only if one of its cells carries text.
    fn row_at<'a>(&self, scope: &ElementRef<'a>, rank: usize) -> Option<ElementRef<'a>> {
        scope
            .nth(&self.row, rank)
            .filter(|row| !row.own_texts(&self.cell).is_empty())
    }

    fn read_row(&self, row: ElementRef<'_>, emblem_url: String) -> TeamStanding {
        let team_name = row.nth_text(&self.team_name, 1).unwrap_or_default();

        let mut texts = row.own_texts(&self.cell).into_iter();
        let stats: [String; TeamStanding::STAT_COUNT] =
            std::array::from_fn(|_| texts.next().unwrap_or_default());

        let points = first_present(&row, &[&self.points_bold, &self.points_plain])
            .unwrap_or_else(|| {
                log::debug!("No points cell for {team_name}");
                String::new()
            });

        TeamStanding::from_parts(emblem_url, team_name, stats, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> StandingsExtractor {
        StandingsExtractor::new(&StandingsSelectors::default()).unwrap()
    }

    fn row(name: &str, stats: [&str; 7], points: &str, bold: bool) -> String {
        let cells: String = stats.iter().map(|s| format!("<td>{s}</td>")).collect();
        let points = if bold {
            format!("<td><b>{points}</b></td>")
        } else {
            format!("<td><span>{points}</span></td>")
        };
        format!(
            r#"<tr><td><div class="img16"><img src="/img/{name}.png"><span><a href="/clubs/{name}">{name}</a></span></div></td>{cells}{points}</tr>"#
        )
    }

    fn page(rows: &[String], extra_emblems: usize) -> String {
        let extra: String = (0..extra_emblems)
            .map(|i| format!(r#"<tr><td><img src="/img/extra{i}.png"></td></tr>"#))
            .collect();
        format!(
            r#"<html><body><table class="tablesorter stngs"><thead><tr><th>#</th></tr></thead><tbody>{}{extra}</tbody></table></body></html>"#,
            rows.concat()
        )
    }

    #[test]
    fn test_extracts_rows_in_rank_order() {
        let html = page(
            &[
                row("Zenit", ["30", "20", "5", "5", "60", "25", "+35"], "65", true),
                row("Spartak", ["30", "18", "6", "6", "50", "30", "+20"], "60", false),
            ],
            0,
        );
        let standings = extractor().extract(&Html::parse_document(&html));

        assert_eq!(standings.len(), 2);
        let leader = &standings[0];
        assert_eq!(leader.emblem_url, "/img/Zenit.png");
        assert_eq!(leader.team_name, "Zenit");
        assert_eq!(leader.games_played, "30");
        assert_eq!(leader.goal_difference, "+35");
        assert_eq!(leader.points, "65");

        let second = &standings[1];
        assert_eq!(second.team_name, "Spartak");
        assert_eq!(second.points, "60");
    }

    #[test]
    fn test_bold_points_win_over_plain() {
        let html = r#"<table class="tablesorter stngs"><tbody>
            <tr><td><img src="/img/z.png"><span><a>Zenit</a></span></td>
                <td>30</td><td>20</td><td>5</td><td>5</td><td>60</td><td>25</td><td>+35</td>
                <td><span>60</span></td><td><b>65</b></td></tr>
        </tbody></table>"#;
        let standings = extractor().extract(&Html::parse_document(html));

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].points, "65");
        assert_eq!(standings[0].goal_difference, "+35");
    }

    #[test]
    fn test_stops_at_first_incomplete_row() {
        let rows: Vec<String> = (0..17)
            .map(|i| row(&format!("T{i}"), ["1", "1", "0", "0", "2", "0", "+2"], "3", false))
            .collect();
        // 18th team has an emblem but its row carries no text
        let html = page(&rows, 1);
        let standings = extractor().extract(&Html::parse_document(&html));

        assert_eq!(standings.len(), 17);
        assert!(standings.iter().all(|s| s.fields().len() == TeamStanding::FIELD_COUNT));
    }

    #[test]
    fn test_never_exceeds_emblem_count() {
        let html = format!(
            r#"<table class="tablesorter stngs"><tbody>{}<tr><td>orphan</td><td>1</td></tr></tbody></table>"#,
            row("Only", ["1", "1", "0", "0", "1", "0", "+1"], "3", true)
        );
        let standings = extractor().extract(&Html::parse_document(&html));
        assert_eq!(standings.len(), 1);
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let html = r#"<table class="tablesorter stngs"><tbody>
            <tr><td><img src="/img/x.png"></td><td>9</td><td>4</td></tr>
        </tbody></table>"#;
        let standings = extractor().extract(&Html::parse_document(html));

        assert_eq!(standings.len(), 1);
        let row = &standings[0];
        assert_eq!(row.team_name, "");
        assert_eq!(row.games_played, "9");
        assert_eq!(row.wins, "4");
        assert_eq!(row.draws, "");
        assert_eq!(row.points, "");
    }

    #[test]
    fn test_empty_page() {
        let standings = extractor().extract(&Html::parse_document("<html></html>"));
        assert!(standings.is_empty());
    }
}
