//! Per-player fielding entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, EntryId, MatchId};

/// One player's fielding performance in one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldingEntry {
    /// Unique identifier (derived from match_id + player)
    pub id: EntryId,

    /// Match this entry belongs to
    pub match_id: MatchId,

    /// Match day the match was played on
    pub date: NaiveDate,

    /// Player name
    pub player: String,

    /// Catches taken
    pub catches: u32,

    /// Run-outs effected
    pub run_outs: u32,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl FieldingEntry {
    /// Create a new FieldingEntry with auto-generated ID.
    pub fn new(
        match_id: MatchId,
        date: NaiveDate,
        player: impl Into<String>,
        catches: u32,
        run_outs: u32,
    ) -> Self {
        let player = player.into();
        let id = EntityId::generate(&["fielding", match_id.as_str(), &player]);

        Self {
            id,
            match_id,
            date,
            player,
            catches,
            run_outs,
            created_at: Utc::now(),
        }
    }
}
