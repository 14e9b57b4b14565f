use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use checkin_domain::{
    normalize_optional_text, CreateEventRequest, Event, EventSummary, UpdateEventRequest,
};

use crate::commands::{normalize_required_text, session_commands, storage_failure};
use crate::credentials::generate_secret_key;
use crate::queries::event_queries::load_event;
use crate::{AppError, AppState};

/// Creates an event with a fresh secret key and makes it the current one.
pub async fn create_event(
    state: &AppState,
    payload: CreateEventRequest,
) -> Result<EventSummary, AppError> {
    let name = normalize_required_text(payload.name, "name")?;
    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        name,
        description: normalize_optional_text(payload.description),
        secret_key: generate_secret_key(),
        created_at: now,
        updated_at: now,
    };

    state
        .event_repo
        .insert_event(&event)
        .await
        .map_err(|err| storage_failure(state, "event insert", err))?;
    session_commands::set_current_event(state, Some(event.id.clone())).await?;
    info!(event_id = %event.id, name = %event.name, "event created");
    Ok(EventSummary::from(&event))
}

/// Renames or re-describes an event. The secret key never changes.
pub async fn update_event(
    state: &AppState,
    event_id: &str,
    payload: UpdateEventRequest,
) -> Result<EventSummary, AppError> {
    let mut event = load_event(state, event_id).await?;
    if let Some(name) = payload.name {
        event.name = normalize_required_text(name, "name")?;
    }
    if let Some(description) = payload.description {
        event.description = normalize_optional_text(Some(description));
    }
    event.updated_at = Utc::now();

    state
        .event_repo
        .update_event(&event)
        .await
        .map_err(|err| storage_failure(state, "event update", err))?;
    Ok(EventSummary::from(&event))
}
