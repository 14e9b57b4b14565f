use std::collections::HashMap;

use checkin_domain::{
    CheckInHistory, CheckInHistoryEntry, CheckInStats, HistoryParticipant, HistoryQuery,
};

use crate::queries::event_queries::load_event;
use crate::{AppError, AppState};

const UNKNOWN_PARTICIPANT: &str = "Unknown";

pub async fn list_check_in_history(
    state: &AppState,
    event_id: &str,
    query: HistoryQuery,
) -> Result<CheckInHistory, AppError> {
    let event = load_event(state, event_id).await?;
    let participants = state.participant_repo.list_participants(&event.id).await?;
    let ids = participants
        .iter()
        .map(|participant| participant.id.clone())
        .collect::<Vec<_>>();
    let by_id = participants
        .into_iter()
        .map(|participant| (participant.id.clone(), participant))
        .collect::<HashMap<_, _>>();
    let check_ins = state.check_in_repo.list_check_ins_by_participants(&ids).await?;

    let mut entries = check_ins
        .into_iter()
        .map(|check_in| {
            let participant = match by_id.get(&check_in.participant_id) {
                Some(participant) => HistoryParticipant {
                    first_name: participant.first_name.clone(),
                    last_name: participant.last_name.clone(),
                    company: participant.company.clone(),
                },
                None => HistoryParticipant {
                    first_name: UNKNOWN_PARTICIPANT.to_string(),
                    last_name: String::new(),
                    company: String::new(),
                },
            };
            CheckInHistoryEntry {
                id: check_in.id,
                checked_in_at: check_in.checked_in_at,
                scanner_name: check_in.scanner_name,
                scanner_email: check_in.scanner_email,
                is_duplicate: check_in.is_duplicate,
                participant,
            }
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.checked_in_at.cmp(&a.checked_in_at));

    let stats = compute_stats(&entries);
    let search = query.search.unwrap_or_default().trim().to_lowercase();
    if !search.is_empty() {
        entries.retain(|entry| matches_search(entry, &search));
    }

    Ok(CheckInHistory { stats, entries })
}

fn compute_stats(entries: &[CheckInHistoryEntry]) -> CheckInStats {
    let total = entries.len();
    let duplicates = entries.iter().filter(|entry| entry.is_duplicate).count();
    CheckInStats {
        total,
        valid: total - duplicates,
        duplicates,
    }
}

fn matches_search(entry: &CheckInHistoryEntry, search: &str) -> bool {
    let full_name = format!(
        "{} {}",
        entry.participant.first_name, entry.participant.last_name
    )
    .to_lowercase();
    full_name.contains(search) || entry.participant.company.to_lowercase().contains(search)
}
