pub mod sessions;
pub mod views;

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::storage::Session;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Resolve a session id from the path.
pub(crate) async fn find_session(state: &AppState, id: &str) -> Result<Session, ApiError> {
    let not_found = || ApiError::NotFound(format!("Session {} not found", id));
    let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
    state.sessions.get(&uuid).await.ok_or_else(not_found)
}
