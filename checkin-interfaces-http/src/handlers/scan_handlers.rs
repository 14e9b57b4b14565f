use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use checkin_application::commands::check_in_commands;
use checkin_application::AppState;
use checkin_domain::{ScanRequest, ScanResult};

use crate::error::HttpError;
use crate::middleware::authorize;

/// Invalid badges are a normal outcome and come back with 200.
pub async fn scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ScanRequest>,
) -> Result<Json<ScanResult>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let result = check_in_commands::scan(&state, payload.qr_data.trim()).await?;
    Ok(Json(result))
}
