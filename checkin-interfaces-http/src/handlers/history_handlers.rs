use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use checkin_application::queries::history_queries;
use checkin_application::AppState;
use checkin_domain::{CheckInHistory, HistoryQuery};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_check_ins(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<CheckInHistory>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let history = history_queries::list_check_in_history(&state, &event_id, query).await?;
    Ok(Json(history))
}
