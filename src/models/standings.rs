// src/models/standings.rs

//! Standings table row.

use serde::{Deserialize, Serialize};

/// One team's line in a season's standings table.
///
/// Values are kept as the display strings the site renders; rank is implied
/// by position in the containing `Vec` (first element is rank 1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub emblem_url: String,
    pub team_name: String,
    pub games_played: String,
    pub wins: String,
    pub draws: String,
    pub losses: String,
    pub goals_for: String,
    pub goals_against: String,
    pub goal_difference: String,
    pub points: String,
}

impl TeamStanding {
    /// Number of columns in a standings row.
    pub const FIELD_COUNT: usize = 10;

    /// Number of plain statistic columns between the team name and points.
    pub const STAT_COUNT: usize = 7;

    /// Build a row from the emblem, name, the seven positional stats and points.
    pub fn from_parts(
        emblem_url: String,
        team_name: String,
        stats: [String; Self::STAT_COUNT],
        points: String,
    ) -> Self {
        let [games_played, wins, draws, losses, goals_for, goals_against, goal_difference] = stats;
        Self {
            emblem_url,
            team_name,
            games_played,
            wins,
            draws,
            losses,
            goals_for,
            goals_against,
            goal_difference,
            points,
        }
    }

    /// Columns in table order.
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            &self.emblem_url,
            &self.team_name,
            &self.games_played,
            &self.wins,
            &self.draws,
            &self.losses,
            &self.goals_for,
            &self.goals_against,
            &self.goal_difference,
            &self.points,
        ]
    }
}
