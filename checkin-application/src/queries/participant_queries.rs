use checkin_domain::Participant;

use crate::queries::event_queries::load_event;
use crate::{AppError, AppState};

/// Roster of an event, most recently imported first.
pub async fn list_participants(
    state: &AppState,
    event_id: &str,
) -> Result<Vec<Participant>, AppError> {
    let event = load_event(state, event_id).await?;
    let mut participants = state.participant_repo.list_participants(&event.id).await?;
    participants.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
    Ok(participants)
}
