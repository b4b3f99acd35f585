use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::ingest;
use crate::models::{DatasetInfo, Table};
use crate::storage::{to_csv_bytes, DELIVERIES_EXPORT, MATCHES_EXPORT};

use super::find_session;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub dataset: DatasetInfo,
}

fn upload_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(format!("Invalid upload: {}", e.body_text()))
    }
}

/// Upload the matches and deliveries files and open a session.
pub async fn create_session(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let mut matches = None;
    let mut deliveries = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let target = match name.as_str() {
            "matches" => &mut matches,
            "deliveries" => &mut deliveries,
            other => {
                debug!("Ignoring upload field {:?}", other);
                continue;
            }
        };
        let bytes = field.bytes().await.map_err(upload_error)?;
        *target = Some(bytes);
    }

    let (Some(matches), Some(deliveries)) = (matches, deliveries) else {
        return Err(ApiError::BadRequest(
            "Please upload both the matches and deliveries CSV files".to_string(),
        ));
    };

    let dataset = tokio::task::spawn_blocking(move || ingest::load_dataset(&matches, &deliveries))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let info = dataset.info(state.config.stats.preview_rows);
    let session = state.sessions.insert(dataset).await;
    info!("Opened session {} for dataset {}", session.id, info.id);

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            created_at: session.created_at,
            dataset: info,
        }),
    ))
}

pub async fn session_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        dataset: session.dataset.info(state.config.stats.preview_rows),
    }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = find_session(&state, &id).await?;
    state.sessions.remove(&session.id).await;
    info!("Closed session {}", session.id);
    Ok(StatusCode::NO_CONTENT)
}

fn csv_download(table: &Table, filename: &str) -> Result<Response, ApiError> {
    let body = to_csv_bytes(table)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

pub async fn export_matches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session = find_session(&state, &id).await?;
    csv_download(&session.dataset.matches, MATCHES_EXPORT)
}

pub async fn export_deliveries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session = find_session(&state, &id).await?;
    csv_download(&session.dataset.deliveries, DELIVERIES_EXPORT)
}
