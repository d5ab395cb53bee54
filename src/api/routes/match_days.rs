//! Match-day and rivalry listing.
//!
//! Backs the date-filter widget: every match day plus every rivalry with
//! its expanded date set, so a client can offer both as filter choices.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{MatchDay, Rivalry};
use crate::storage::{EntityType, JsonlReader};

#[derive(Debug, Serialize)]
pub struct MatchDayInfo {
    pub date: String,
    pub title: String,
    pub rivalry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RivalryInfo {
    pub name: String,
    pub start: String,
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchDaysResponse {
    pub dates: Vec<MatchDayInfo>,
    pub rivalries: Vec<RivalryInfo>,
}

pub async fn list_match_days(
    State(state): State<AppState>,
) -> Result<Json<MatchDaysResponse>, ApiError> {
    let mut days: Vec<MatchDay> =
        JsonlReader::for_entity(&state.storage, EntityType::MatchDay).read_all()?;
    days.sort_by_key(|d| d.date);

    let mut rivalries: Vec<Rivalry> =
        JsonlReader::for_entity(&state.storage, EntityType::Rivalry).read_all()?;
    rivalries.sort_by_key(|r| r.start);

    let rivalry_infos = rivalries
        .iter()
        .map(|r| RivalryInfo {
            name: r.name.clone(),
            start: r.start.to_string(),
            dates: r.dates(&days).iter().map(|d| d.to_string()).collect(),
        })
        .collect();

    Ok(Json(MatchDaysResponse {
        dates: days
            .iter()
            .map(|d| MatchDayInfo {
                date: d.date.to_string(),
                title: d.title.clone(),
                rivalry: d.rivalry.clone(),
            })
            .collect(),
        rivalries: rivalry_infos,
    }))
}
