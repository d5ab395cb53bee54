//! Statistics table endpoints.
//!
//! One endpoint per stat domain. Each resolves the `date`/`rivalry` query
//! parameters into a date selection, loads the relevant entries, and
//! returns a display-ready table computed by the aggregation layer.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{dedup_by_id, ApiError};
use crate::models::{BattingEntry, BowlingEntry, FieldingEntry, Innings, Match, MatchDay};
use crate::stats::aggregate::{
    self, BattingRow, BowlingRow, FieldingRow, PotmRow, TeamRow,
};
use crate::stats::filter::{DateSelection, StatsFilter};
use crate::storage::{EntityType, JsonlReader};

/// Shared filter parameters: `date` holds comma-separated `YYYY-MM-DD`
/// tokens, `rivalry` a rivalry name. Absence of both means all time.
#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub date: Option<String>,
    pub rivalry: Option<String>,
}

impl StatsParams {
    fn filter(&self) -> StatsFilter {
        StatsFilter::from_params(self.date.as_deref(), self.rivalry.as_deref())
    }
}

fn resolve_selection(state: &AppState, params: &StatsParams) -> Result<DateSelection, ApiError> {
    let filter = params.filter();
    let days: Vec<MatchDay> =
        JsonlReader::for_entity(&state.storage, EntityType::MatchDay).read_all()?;
    Ok(filter.resolve(&days))
}

// ── Batting ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BattingResponse {
    pub rows: Vec<BattingRow>,
}

pub async fn batting(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<BattingResponse>, ApiError> {
    let selection = resolve_selection(&state, &params)?;

    let entries: Vec<BattingEntry> =
        JsonlReader::for_entity(&state.storage, EntityType::Batting).read_all()?;
    let entries = dedup_by_id(entries, |e| e.id.as_str());

    Ok(Json(BattingResponse {
        rows: aggregate::batting_stats(&entries, &selection),
    }))
}

// ── Bowling ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BowlingResponse {
    pub rows: Vec<BowlingRow>,
}

pub async fn bowling(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<BowlingResponse>, ApiError> {
    let selection = resolve_selection(&state, &params)?;

    let entries: Vec<BowlingEntry> =
        JsonlReader::for_entity(&state.storage, EntityType::Bowling).read_all()?;
    let entries = dedup_by_id(entries, |e| e.id.as_str());

    Ok(Json(BowlingResponse {
        rows: aggregate::bowling_stats(&entries, &selection),
    }))
}

// ── Fielding ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FieldingResponse {
    pub rows: Vec<FieldingRow>,
}

pub async fn fielding(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<FieldingResponse>, ApiError> {
    let selection = resolve_selection(&state, &params)?;

    let entries: Vec<FieldingEntry> =
        JsonlReader::for_entity(&state.storage, EntityType::Fielding).read_all()?;
    let entries = dedup_by_id(entries, |e| e.id.as_str());

    Ok(Json(FieldingResponse {
        rows: aggregate::fielding_stats(&entries, &selection),
    }))
}

// ── Teams ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub rows: Vec<TeamRow>,
}

pub async fn teams(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<TeamsResponse>, ApiError> {
    let selection = resolve_selection(&state, &params)?;

    let matches: Vec<Match> =
        JsonlReader::for_entity(&state.storage, EntityType::Match).read_all()?;
    let matches = dedup_by_id(matches, |m| m.id.as_str());

    let innings: Vec<Innings> =
        JsonlReader::for_entity(&state.storage, EntityType::Innings).read_all()?;
    let innings = dedup_by_id(innings, |i| i.id.as_str());

    Ok(Json(TeamsResponse {
        rows: aggregate::team_stats(&matches, &innings, &selection),
    }))
}

// ── Player of the match ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PotmResponse {
    pub rows: Vec<PotmRow>,
}

pub async fn player_of_match(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<PotmResponse>, ApiError> {
    let selection = resolve_selection(&state, &params)?;

    let matches: Vec<Match> =
        JsonlReader::for_entity(&state.storage, EntityType::Match).read_all()?;
    let matches = dedup_by_id(matches, |m| m.id.as_str());

    Ok(Json(PotmResponse {
        rows: aggregate::potm_stats(&matches, &selection),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::{BattingEntry, EntityId, Innings, Match, MatchDay};
    use crate::storage::StorageConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn write_jsonl<T: serde::Serialize>(path: &std::path::Path, items: &[T]) {
        let mut content = String::new();
        for item in items {
            content.push_str(&serde_json::to_string(item).unwrap());
            content.push('\n');
        }
        std::fs::write(path, content).unwrap();
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn setup_test_state(dir: &std::path::Path) -> AppState {
        AppState {
            storage: Arc::new(StorageConfig::new(dir.to_path_buf())),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bat(match_id: &str, d: chrono::NaiveDate, player: &str, runs: u32, balls: u32) -> BattingEntry {
        BattingEntry::new(EntityId::from(match_id), d, player, runs, balls)
    }

    #[tokio::test]
    async fn test_batting_stats_all_time() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let entries = vec![
            bat("m1", date(2025, 6, 15), "A", 10, 12),
            bat("m2", date(2025, 6, 22), "A", 5, 8),
            bat("m1", date(2025, 6, 15), "B", 3, 4),
        ];
        write_jsonl(&tmp.path().join("batting.jsonl"), &entries);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/batting").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["player"], "A");
        assert_eq!(rows[0]["runs"], 15);
        assert_eq!(rows[0]["balls"], 20);
        assert_eq!(rows[0]["strike_rate"], 75.0);
    }

    #[tokio::test]
    async fn test_batting_stats_date_filter_excludes() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let entries = vec![
            bat("m1", date(2025, 6, 15), "A", 10, 12),
            bat("m2", date(2025, 6, 22), "B", 30, 20),
        ];
        write_jsonl(&tmp.path().join("batting.jsonl"), &entries);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/batting?date=2025-06-15").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        // B has no qualifying entries and never appears
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["player"], "A");
    }

    #[tokio::test]
    async fn test_batting_stats_malformed_date_falls_back_to_all_time() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let entries = vec![
            bat("m1", date(2025, 6, 15), "A", 10, 12),
            bat("m2", date(2025, 6, 22), "B", 30, 20),
        ];
        write_jsonl(&tmp.path().join("batting.jsonl"), &entries);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/batting?date=not-a-date").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_batting_stats_rivalry_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let days = vec![
            MatchDay::new(date(2025, 6, 15), "Day 1").with_rivalry("Summer Cup"),
            MatchDay::new(date(2025, 6, 22), "Open Day"),
        ];
        write_jsonl(&tmp.path().join("match_days.jsonl"), &days);

        let entries = vec![
            bat("m1", date(2025, 6, 15), "A", 10, 12),
            bat("m2", date(2025, 6, 22), "B", 30, 20),
        ];
        write_jsonl(&tmp.path().join("batting.jsonl"), &entries);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/batting?rivalry=Summer%20Cup").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["player"], "A");
    }

    #[tokio::test]
    async fn test_batting_stats_rivalry_wins_over_date() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let days = vec![
            MatchDay::new(date(2025, 6, 15), "Day 1").with_rivalry("Summer Cup"),
            MatchDay::new(date(2025, 6, 22), "Open Day"),
        ];
        write_jsonl(&tmp.path().join("match_days.jsonl"), &days);

        let entries = vec![
            bat("m1", date(2025, 6, 15), "A", 10, 12),
            bat("m2", date(2025, 6, 22), "B", 30, 20),
        ];
        write_jsonl(&tmp.path().join("batting.jsonl"), &entries);

        let app = build_router(state);
        // Date points at the open day, rivalry at the cup; rivalry wins
        let (status, json) =
            get_json(app, "/api/stats/batting?date=2025-06-22&rivalry=Summer%20Cup").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["player"], "A");
    }

    #[tokio::test]
    async fn test_batting_stats_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/batting").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bowling_stats_dash_average() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let entries = vec![
            crate::models::BowlingEntry::new(
                EntityId::from("m1"),
                date(2025, 6, 15),
                "A",
                12,
                20,
                0,
            ),
            crate::models::BowlingEntry::new(
                EntityId::from("m1"),
                date(2025, 6, 15),
                "B",
                12,
                15,
                3,
            ),
        ];
        write_jsonl(&tmp.path().join("bowling.jsonl"), &entries);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/bowling").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        // Ranked by wickets
        assert_eq!(rows[0]["player"], "B");
        assert_eq!(rows[0]["average"], 5.0);
        assert_eq!(rows[1]["player"], "A");
        assert!(rows[1]["average"].is_null());
    }

    #[tokio::test]
    async fn test_fielding_stats() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let entries = vec![
            crate::models::FieldingEntry::new(EntityId::from("m1"), date(2025, 6, 15), "A", 2, 0),
            crate::models::FieldingEntry::new(EntityId::from("m2"), date(2025, 6, 22), "A", 1, 1),
            crate::models::FieldingEntry::new(EntityId::from("m1"), date(2025, 6, 15), "B", 1, 0),
        ];
        write_jsonl(&tmp.path().join("fielding.jsonl"), &entries);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/fielding").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows[0]["player"], "A");
        assert_eq!(rows[0]["catches"], 3);
        assert_eq!(rows[0]["run_outs"], 1);
        assert_eq!(rows[0]["innings"], 2);
    }

    #[tokio::test]
    async fn test_team_stats_includes_winless_team() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let m1 = Match::new(date(2025, 6, 15), "Lions", "Tigers").with_result("Lions", "by 20 runs");
        let innings = vec![
            Innings::new(m1.id.clone(), "Lions", 120, 72, 4),
            Innings::new(m1.id.clone(), "Tigers", 100, 70, 8),
        ];
        write_jsonl(&tmp.path().join("matches.jsonl"), &[&m1]);
        write_jsonl(&tmp.path().join("innings.jsonl"), &innings);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/teams").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["team"], "Lions");
        assert_eq!(rows[0]["win_percent"], 100);
        assert_eq!(rows[1]["team"], "Tigers");
        assert_eq!(rows[1]["won"], 0);
        assert_eq!(rows[1]["win_percent"], 0);
    }

    #[tokio::test]
    async fn test_potm_stats() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let matches = vec![
            Match::new(date(2025, 6, 15), "Lions", "Tigers").with_potm("A"),
            Match::new(date(2025, 6, 22), "Lions", "Tigers").with_potm("A"),
            Match::new(date(2025, 6, 29), "Lions", "Tigers").with_potm("B"),
            Match::new(date(2025, 7, 6), "Lions", "Tigers"),
        ];
        write_jsonl(&tmp.path().join("matches.jsonl"), &matches);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/stats/potm").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["player"], "A");
        assert_eq!(rows[0]["count"], 2);
    }

    #[tokio::test]
    async fn test_stats_deterministic_across_requests() {
        let tmp = tempfile::tempdir().unwrap();

        let entries = vec![
            bat("m1", date(2025, 6, 15), "A", 20, 10),
            bat("m1", date(2025, 6, 15), "B", 20, 30),
            bat("m2", date(2025, 6, 22), "C", 20, 25),
        ];
        write_jsonl(&tmp.path().join("batting.jsonl"), &entries);

        let (_, first) = get_json(
            build_router(setup_test_state(tmp.path())),
            "/api/stats/batting",
        )
        .await;
        let (_, second) = get_json(
            build_router(setup_test_state(tmp.path())),
            "/api/stats/batting",
        )
        .await;

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        // All three tie on runs; storage order decides
        let rows = first["rows"].as_array().unwrap();
        assert_eq!(rows[0]["player"], "A");
        assert_eq!(rows[1]["player"], "B");
        assert_eq!(rows[2]["player"], "C");
    }

    #[tokio::test]
    async fn test_duplicate_entries_dedup_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        // The same entry written twice (e.g., a re-import) counts once
        let entry = bat("m1", date(2025, 6, 15), "A", 10, 12);
        write_jsonl(&tmp.path().join("batting.jsonl"), &[&entry, &entry]);

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/stats/batting").await;

        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["innings"], 1);
        assert_eq!(rows[0]["runs"], 10);
    }
}
