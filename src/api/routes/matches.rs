//! Match list and detail endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{dedup_by_id, ApiError, Pagination, PaginationMeta};
use crate::models::{BattingEntry, BowlingEntry, FieldingEntry, Innings, Match, MatchDay};
use crate::stats::filter::StatsFilter;
use crate::stats::Overs;
use crate::storage::{EntityType, JsonlReader};

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub date: Option<String>,
    pub rivalry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InningsSummary {
    pub team: String,
    pub score: String,
    pub overs: String,
    pub all_out: bool,
}

impl InningsSummary {
    fn from_innings(innings: &Innings) -> Self {
        Self {
            team: innings.team.clone(),
            score: innings.score_line(),
            overs: Overs::from_balls(innings.balls as i64).to_string(),
            all_out: innings.all_out,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub date: String,
    pub team_a: String,
    pub team_b: String,
    pub winner: Option<String>,
    pub margin: Option<String>,
    pub potm: Option<String>,
    pub innings: Vec<InningsSummary>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchSummary>,
    pub pagination: PaginationMeta,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let filter = StatsFilter::from_params(params.date.as_deref(), params.rivalry.as_deref());
    let days: Vec<MatchDay> =
        JsonlReader::for_entity(&state.storage, EntityType::MatchDay).read_all()?;
    let selection = filter.resolve(&days);

    let matches: Vec<Match> =
        JsonlReader::for_entity(&state.storage, EntityType::Match).read_all()?;
    let mut matches = dedup_by_id(matches, |m| m.id.as_str());
    matches.retain(|m| selection.contains(m.date));

    // Newest first
    matches.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.team_a.cmp(&b.team_a)));

    let innings: Vec<Innings> =
        JsonlReader::for_entity(&state.storage, EntityType::Innings).read_all()?;
    let innings = dedup_by_id(innings, |i| i.id.as_str());

    let pagination = Pagination::new(params.page, params.page_size);
    let total_items = matches.len() as u32;
    let meta = PaginationMeta::new(&pagination, total_items);

    let start = pagination.offset() as usize;
    let end = (start + pagination.page_size as usize).min(matches.len());
    let page_matches = if start < matches.len() {
        &matches[start..end]
    } else {
        &[]
    };

    let summaries: Vec<MatchSummary> = page_matches
        .iter()
        .map(|m| MatchSummary {
            id: m.id.as_str().to_string(),
            date: m.date.to_string(),
            team_a: m.team_a.clone(),
            team_b: m.team_b.clone(),
            winner: m.winner.clone(),
            margin: m.margin.clone(),
            potm: m.potm.clone(),
            innings: innings
                .iter()
                .filter(|i| i.match_id == m.id)
                .map(InningsSummary::from_innings)
                .collect(),
        })
        .collect();

    Ok(Json(MatchListResponse {
        matches: summaries,
        pagination: meta,
    }))
}

#[derive(Debug, Serialize)]
pub struct BattingCard {
    pub player: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub not_out: bool,
}

#[derive(Debug, Serialize)]
pub struct BowlingCard {
    pub player: String,
    pub overs: String,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub dots: u32,
}

#[derive(Debug, Serialize)]
pub struct FieldingCard {
    pub player: String,
    pub catches: u32,
    pub run_outs: u32,
}

#[derive(Debug, Serialize)]
pub struct MatchDetailResponse {
    pub id: String,
    pub date: String,
    pub team_a: String,
    pub team_b: String,
    pub winner: Option<String>,
    pub margin: Option<String>,
    pub potm: Option<String>,
    pub innings: Vec<InningsSummary>,
    pub batting: Vec<BattingCard>,
    pub bowling: Vec<BowlingCard>,
    pub fielding: Vec<FieldingCard>,
}

pub async fn match_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchDetailResponse>, ApiError> {
    let matches: Vec<Match> =
        JsonlReader::for_entity(&state.storage, EntityType::Match).read_all()?;
    let matches = dedup_by_id(matches, |m| m.id.as_str());

    let m = matches
        .iter()
        .find(|m| m.id.as_str() == id)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", id)))?;

    let innings: Vec<Innings> =
        JsonlReader::for_entity(&state.storage, EntityType::Innings).read_all()?;
    let innings = dedup_by_id(innings, |i| i.id.as_str());

    let batting: Vec<BattingEntry> =
        JsonlReader::for_entity(&state.storage, EntityType::Batting).read_all()?;
    let batting = dedup_by_id(batting, |e| e.id.as_str());

    let bowling: Vec<BowlingEntry> =
        JsonlReader::for_entity(&state.storage, EntityType::Bowling).read_all()?;
    let bowling = dedup_by_id(bowling, |e| e.id.as_str());

    let fielding: Vec<FieldingEntry> =
        JsonlReader::for_entity(&state.storage, EntityType::Fielding).read_all()?;
    let fielding = dedup_by_id(fielding, |e| e.id.as_str());

    Ok(Json(MatchDetailResponse {
        id: m.id.as_str().to_string(),
        date: m.date.to_string(),
        team_a: m.team_a.clone(),
        team_b: m.team_b.clone(),
        winner: m.winner.clone(),
        margin: m.margin.clone(),
        potm: m.potm.clone(),
        innings: innings
            .iter()
            .filter(|i| i.match_id == m.id)
            .map(InningsSummary::from_innings)
            .collect(),
        batting: batting
            .iter()
            .filter(|e| e.match_id == m.id)
            .map(|e| BattingCard {
                player: e.player.clone(),
                runs: e.runs,
                balls: e.balls,
                fours: e.fours,
                sixes: e.sixes,
                not_out: e.not_out,
            })
            .collect(),
        bowling: bowling
            .iter()
            .filter(|e| e.match_id == m.id)
            .map(|e| BowlingCard {
                player: e.player.clone(),
                overs: Overs::from_balls(e.balls as i64).to_string(),
                runs_conceded: e.runs_conceded,
                wickets: e.wickets,
                dots: e.dots,
            })
            .collect(),
        fielding: fielding
            .iter()
            .filter(|e| e.match_id == m.id)
            .map(|e| FieldingCard {
                player: e.player.clone(),
                catches: e.catches,
                run_outs: e.run_outs,
            })
            .collect(),
    }))
}
