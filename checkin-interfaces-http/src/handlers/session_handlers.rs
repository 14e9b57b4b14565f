use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use checkin_application::commands::session_commands;
use checkin_application::queries::event_queries;
use checkin_application::AppState;
use checkin_domain::{ScannerInfo, SelectEventRequest, SessionView};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let session = event_queries::get_session(&state).await?;
    Ok(Json(session))
}

pub async fn select_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SelectEventRequest>,
) -> Result<Json<SessionView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let session = session_commands::select_event(&state, payload.event_id).await?;
    Ok(Json(session))
}

pub async fn set_scanner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ScannerInfo>,
) -> Result<Json<ScannerInfo>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let scanner = session_commands::set_scanner(&state, payload).await?;
    Ok(Json(scanner))
}

pub async fn clear_scanner(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    session_commands::clear_scanner(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}
