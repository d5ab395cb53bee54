//! Per-player batting entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, EntryId, MatchId};

/// One player's batting performance in one match.
///
/// Entries are produced by external match-entry tooling and are read-only
/// from the statistics layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattingEntry {
    /// Unique identifier (derived from match_id + player)
    pub id: EntryId,

    /// Match this entry belongs to
    pub match_id: MatchId,

    /// Match day the match was played on
    pub date: NaiveDate,

    /// Player name
    pub player: String,

    /// Runs scored
    pub runs: u32,

    /// Balls faced
    pub balls: u32,

    /// Boundary fours
    pub fours: u32,

    /// Sixes
    pub sixes: u32,

    /// Whether the player remained not out
    pub not_out: bool,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl BattingEntry {
    /// Create a new BattingEntry with auto-generated ID.
    pub fn new(
        match_id: MatchId,
        date: NaiveDate,
        player: impl Into<String>,
        runs: u32,
        balls: u32,
    ) -> Self {
        let player = player.into();
        let id = EntityId::generate(&["batting", match_id.as_str(), &player]);

        Self {
            id,
            match_id,
            date,
            player,
            runs,
            balls,
            fours: 0,
            sixes: 0,
            not_out: false,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set boundary counts.
    pub fn with_boundaries(mut self, fours: u32, sixes: u32) -> Self {
        self.fours = fours;
        self.sixes = sixes;
        self
    }

    /// Builder method to mark the player as not out.
    pub fn with_not_out(mut self) -> Self {
        self.not_out = true;
        self
    }

    /// A duck: dismissed without scoring.
    pub fn is_duck(&self) -> bool {
        self.runs == 0 && !self.not_out
    }
}
