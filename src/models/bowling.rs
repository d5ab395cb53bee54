//! Per-player bowling entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, EntryId, MatchId};

/// One player's bowling performance in one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BowlingEntry {
    /// Unique identifier (derived from match_id + player)
    pub id: EntryId,

    /// Match this entry belongs to
    pub match_id: MatchId,

    /// Match day the match was played on
    pub date: NaiveDate,

    /// Player name
    pub player: String,

    /// Legal balls bowled
    pub balls: u32,

    /// Runs conceded
    pub runs_conceded: u32,

    /// Wickets taken
    pub wickets: u32,

    /// Dot balls
    pub dots: u32,

    /// Wides
    pub wides: u32,

    /// No-balls
    pub no_balls: u32,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl BowlingEntry {
    /// Create a new BowlingEntry with auto-generated ID.
    pub fn new(
        match_id: MatchId,
        date: NaiveDate,
        player: impl Into<String>,
        balls: u32,
        runs_conceded: u32,
        wickets: u32,
    ) -> Self {
        let player = player.into();
        let id = EntityId::generate(&["bowling", match_id.as_str(), &player]);

        Self {
            id,
            match_id,
            date,
            player,
            balls,
            runs_conceded,
            wickets,
            dots: 0,
            wides: 0,
            no_balls: 0,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set the dot-ball count.
    pub fn with_dots(mut self, dots: u32) -> Self {
        self.dots = dots;
        self
    }

    /// Builder method to set extras conceded.
    pub fn with_extras(mut self, wides: u32, no_balls: u32) -> Self {
        self.wides = wides;
        self.no_balls = no_balls;
        self
    }
}
