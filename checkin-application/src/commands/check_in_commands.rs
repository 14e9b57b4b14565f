use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use checkin_domain::{CheckIn, ScanContext, ScanResult, StoreError};

use crate::commands::storage_failure;
use crate::credentials;
use crate::queries::event_queries::load_event;
use crate::{AppError, AppState};

/// Resolves the session's event and scanner, refusing to scan without both.
pub async fn resolve_scan_context(state: &AppState) -> Result<ScanContext, AppError> {
    let session = state.session.read().await.clone();
    let event_id = session
        .current_event_id
        .ok_or_else(|| AppError::BadRequest("no event selected".to_string()))?;
    let scanner = session
        .scanner
        .ok_or_else(|| AppError::BadRequest("scanner identity not configured".to_string()))?;
    let event = load_event(state, &event_id).await?;
    Ok(ScanContext { event, scanner })
}

pub async fn scan(state: &AppState, qr_data: &str) -> Result<ScanResult, AppError> {
    let context = resolve_scan_context(state).await?;
    process_scan(state, &context, qr_data).await
}

/// Classifies one decoded badge and records the check-in.
///
/// Invalid badges (bad envelope, bad signature, unknown participant) are
/// reported identically and leave no record. Valid badges always produce a
/// check-in; it is flagged as duplicate when the participant already has one.
pub async fn process_scan(
    state: &AppState,
    context: &ScanContext,
    qr_data: &str,
) -> Result<ScanResult, AppError> {
    let event = &context.event;

    let payload = match credentials::verify_participant(qr_data, &event.secret_key) {
        Ok(payload) => payload,
        Err(reason) => {
            debug!(event_id = %event.id, %reason, "badge verification failed");
            return Ok(reject(state, &event.id));
        }
    };

    let participant = state
        .participant_repo
        .find_by_qr_code(qr_data)
        .await?
        .filter(|participant| participant.event_id == event.id);
    let Some(participant) = participant else {
        debug!(event_id = %event.id, "signed badge has no roster entry");
        return Ok(reject(state, &event.id));
    };

    let _guard = state.check_in_locks.acquire(&participant.id).await;
    let prior = state
        .check_in_repo
        .list_check_ins_by_participant(&participant.id)
        .await?;
    let check_in = CheckIn {
        id: Uuid::new_v4().to_string(),
        participant_id: participant.id.clone(),
        scanner_name: context.scanner.name.clone(),
        scanner_email: context.scanner.email.clone(),
        checked_in_at: Utc::now(),
        is_duplicate: !prior.is_empty(),
    };
    if let Err(err) = state.check_in_repo.insert_check_in(&check_in).await {
        // Purged between lookup and insert: the badge no longer has a roster entry.
        if let Some(StoreError::UnknownParticipant(_)) = err.downcast_ref::<StoreError>() {
            debug!(
                event_id = %event.id,
                participant_id = %participant.id,
                "participant removed during scan"
            );
            return Ok(reject(state, &event.id));
        }
        return Err(storage_failure(state, "check-in insert", err));
    }

    let result = ScanResult::recorded(payload, check_in);
    state.metrics.record_scan(result.status);
    info!(
        event_id = %event.id,
        participant_id = %participant.id,
        scanner = %context.scanner.name,
        status = result.status.as_str(),
        previous_check_ins = prior.len(),
        "badge scanned"
    );
    Ok(result)
}

fn reject(state: &AppState, event_id: &str) -> ScanResult {
    let result = ScanResult::invalid();
    state.metrics.record_scan(result.status);
    warn!(event_id = %event_id, "invalid badge scanned");
    result
}
