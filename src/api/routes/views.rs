use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, Overview, Section};
use crate::models::{
    BowlerSummary, OutcomeTally, PlayerSummary, RunDistribution, SeasonSummary, TeamSummary,
};

use super::find_session;

// ── Overview ────────────────────────────────────────────────────

pub async fn overview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Overview>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::dashboard_overview(
        &session.dataset,
        state.config.stats.top_n,
    )))
}

// ── Players ─────────────────────────────────────────────────────

pub async fn list_players(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::batsmen(&session.dataset)))
}

pub async fn player(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<PlayerSummary>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::player_summary(&session.dataset, &name)))
}

// ── Teams ───────────────────────────────────────────────────────

pub async fn list_teams(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Section<Vec<String>>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::teams(&session.dataset).into()))
}

pub async fn team(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<Section<TeamSummary>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::team_summary(&session.dataset, &name).into()))
}

// ── Seasons ─────────────────────────────────────────────────────

pub async fn list_seasons(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Section<Vec<String>>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::seasons(&session.dataset).into()))
}

pub async fn season(
    State(state): State<AppState>,
    Path((id, season)): Path<(String, String)>,
) -> Result<Json<Section<SeasonSummary>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(
        calculate::season_summary(&session.dataset, &season).into(),
    ))
}

// ── Bowlers ─────────────────────────────────────────────────────

pub async fn list_bowlers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Section<Vec<String>>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::bowlers(&session.dataset).into()))
}

pub async fn bowler(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<Section<BowlerSummary>>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(
        calculate::bowler_summary(&session.dataset, &name).into(),
    ))
}

// ── Outcomes ────────────────────────────────────────────────────

pub async fn outcomes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OutcomeTally>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(calculate::outcome_tally(&session.dataset)))
}

// ── Run distribution ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RunDistributionParams {
    pub team: String,
    pub season: Option<String>,
}

pub async fn run_distribution(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<RunDistributionParams>, QueryRejection>,
) -> Result<Json<Section<RunDistribution>>, ApiError> {
    let Query(params) =
        params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let session = find_session(&state, &id).await?;
    let season = params.season.as_deref().filter(|s| !s.is_empty());
    Ok(Json(
        calculate::run_distribution(&session.dataset, &params.team, season).into(),
    ))
}
