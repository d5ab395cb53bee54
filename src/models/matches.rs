//! Match and innings models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, InningsId, MatchId};

/// A match played on one match day between two teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier (derived from date + teams)
    pub id: MatchId,

    /// Match day this match was played on
    pub date: NaiveDate,

    /// Team batting first
    pub team_a: String,

    /// Team batting second
    pub team_b: String,

    /// Winning team, if the match produced a result
    pub winner: Option<String>,

    /// Win margin description (e.g., "by 23 runs", "by 4 wickets")
    pub margin: Option<String>,

    /// Player of the match, if awarded
    pub potm: Option<String>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Create a new Match with auto-generated ID.
    pub fn new(date: NaiveDate, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        let team_a = team_a.into();
        let team_b = team_b.into();
        let id = EntityId::generate(&[&date.to_string(), &team_a, &team_b]);

        Self {
            id,
            date,
            team_a,
            team_b,
            winner: None,
            margin: None,
            potm: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set the result.
    pub fn with_result(mut self, winner: impl Into<String>, margin: impl Into<String>) -> Self {
        self.winner = Some(winner.into());
        self.margin = Some(margin.into());
        self
    }

    /// Builder method to set the player of the match.
    pub fn with_potm(mut self, player: impl Into<String>) -> Self {
        self.potm = Some(player.into());
        self
    }

    /// Check whether the given team played in this match.
    pub fn has_team(&self, team: &str) -> bool {
        self.team_a == team || self.team_b == team
    }
}

/// One team's innings within a match. Every match has exactly two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Innings {
    /// Unique identifier (derived from match_id + team)
    pub id: InningsId,

    /// Match this innings belongs to
    pub match_id: MatchId,

    /// Batting team
    pub team: String,

    /// Runs scored
    pub runs: u32,

    /// Balls faced
    pub balls: u32,

    /// Wickets lost
    pub wickets: u32,

    /// Whether the side was bowled out
    pub all_out: bool,
}

impl Innings {
    /// Create a new Innings with auto-generated ID.
    pub fn new(match_id: MatchId, team: impl Into<String>, runs: u32, balls: u32, wickets: u32) -> Self {
        let team = team.into();
        let id = EntityId::generate(&[match_id.as_str(), &team]);

        Self {
            id,
            match_id,
            team,
            runs,
            balls,
            wickets,
            all_out: false,
        }
    }

    /// Builder method to mark the side as bowled out.
    pub fn with_all_out(mut self) -> Self {
        self.all_out = true;
        self
    }

    /// Scorecard form of this innings, e.g. "142/5".
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }
}
