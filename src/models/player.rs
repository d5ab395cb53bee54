//! Player model.

use serde::{Deserialize, Serialize};

/// A player in the group. The name is the unique key; every performance
/// entry references a player by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    /// Player name (unique)
    pub name: String,
}

impl Player {
    /// Create a new Player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
