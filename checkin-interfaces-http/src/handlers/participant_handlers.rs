use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use checkin_application::commands::participant_commands;
use checkin_application::queries::participant_queries;
use checkin_application::AppState;
use checkin_domain::{ImportReport, Participant, PurgeReport};

use crate::error::HttpError;
use crate::middleware::{authorize, read_body};

pub async fn list_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Participant>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let participants = participant_queries::list_participants(&state, &event_id).await?;
    Ok(Json(participants))
}

/// Accepts the roster file as the raw request body.
pub async fn import_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    body: Bytes,
) -> Result<Json<ImportReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let content = read_body(&headers, &body, state.config.max_body_bytes)
        .map_err(|err| HttpError::BadRequest(format!("unreadable body: {}", err)))?;
    let report = participant_commands::import_roster(&state, &event_id, &content).await?;
    Ok(Json(report))
}

pub async fn purge_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<PurgeReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let report = participant_commands::purge_participants(&state, &event_id).await?;
    Ok(Json(report))
}
