use checkin_domain::{Event, EventSummary, SessionView};

use crate::{AppError, AppState};

pub async fn list_events(state: &AppState) -> Result<Vec<EventSummary>, AppError> {
    let mut events = state.event_repo.list_events().await?;
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(events.iter().map(EventSummary::from).collect())
}

pub async fn get_event(state: &AppState, event_id: &str) -> Result<EventSummary, AppError> {
    load_event(state, event_id)
        .await
        .map(|event| EventSummary::from(&event))
}

pub async fn get_session(state: &AppState) -> Result<SessionView, AppError> {
    let session = state.session.read().await.clone();
    let current_event = match session.current_event_id.as_deref() {
        Some(event_id) => state
            .event_repo
            .get_event(event_id)
            .await?
            .map(|event| EventSummary::from(&event)),
        None => None,
    };
    Ok(SessionView {
        current_event,
        scanner: session.scanner,
    })
}

/// Full event record, key included. Stays inside the application layer.
pub(crate) async fn load_event(state: &AppState, event_id: &str) -> Result<Event, AppError> {
    state
        .event_repo
        .get_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", event_id)))
}
