//! REST API endpoints.
//!
//! Axum-based HTTP API: upload a matches/deliveries pair to open a session,
//! then query the session's views and download the cleaned tables.

pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::ingest::IngestError;
use crate::storage::StorageError;

use routes::{sessions, views};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Deliveries file is missing required columns: {missing:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::PayloadTooLarge(_) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
            }
            ApiError::MissingColumns { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_COLUMNS")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let details = match &self {
            ApiError::MissingColumns { missing, available } => Some(serde_json::json!({
                "missing": missing,
                "available": available,
            })),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::MissingColumns { missing, available } => {
                ApiError::MissingColumns { missing, available }
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!("Invalid CORS origin {:?}, allowing any", origin);
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);
    let body_limit = state.config.upload.max_upload_bytes;

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:id",
            get(sessions::session_info).delete(sessions::delete_session),
        )
        .route(
            "/api/sessions/:id/exports/matches.csv",
            get(sessions::export_matches),
        )
        .route(
            "/api/sessions/:id/exports/deliveries.csv",
            get(sessions::export_deliveries),
        )
        .route("/api/sessions/:id/overview", get(views::overview))
        .route("/api/sessions/:id/players", get(views::list_players))
        .route("/api/sessions/:id/players/:name", get(views::player))
        .route("/api/sessions/:id/teams", get(views::list_teams))
        .route("/api/sessions/:id/teams/:name", get(views::team))
        .route("/api/sessions/:id/seasons", get(views::list_seasons))
        .route("/api/sessions/:id/seasons/:season", get(views::season))
        .route("/api/sessions/:id/bowlers", get(views::list_bowlers))
        .route("/api/sessions/:id/bowlers/:name", get(views::bowler))
        .route("/api/sessions/:id/outcomes", get(views::outcomes))
        .route(
            "/api/sessions/:id/run-distribution",
            get(views::run_distribution),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_maps_to_missing_columns() {
        let err: ApiError = IngestError::MissingColumns {
            missing: vec!["batsman".into()],
            available: vec!["striker".into()],
        }
        .into();
        assert!(matches!(err, ApiError::MissingColumns { .. }));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).into_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
