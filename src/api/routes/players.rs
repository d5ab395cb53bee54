//! Player directory endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;
use crate::storage::{EntityType, JsonlReader};

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
    pub players: Vec<Player>,
}

pub async fn list_players(State(state): State<AppState>) -> Result<Json<PlayersResponse>, ApiError> {
    let mut players: Vec<Player> =
        JsonlReader::for_entity(&state.storage, EntityType::Player).read_all()?;
    players.sort_by(|a, b| a.name.cmp(&b.name));
    players.dedup_by(|a, b| a.name == b.name);

    Ok(Json(PlayersResponse { players }))
}
