use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use checkin_domain::{
    normalize_email, Event, ImportReport, ImportedParticipant, Participant, ParticipantData,
    PurgeReport,
};

use crate::commands::storage_failure;
use crate::credentials::{derive_participant_id, sign_participant};
use crate::queries::event_queries::load_event;
use crate::{AppError, AppState};

/// Parses a roster file and imports it into the event.
pub async fn import_roster(
    state: &AppState,
    event_id: &str,
    content: &[u8],
) -> Result<ImportReport, AppError> {
    let event = load_event(state, event_id).await?;
    let rows = state.roster_parser.parse(content)?;
    import_participants(state, &event, rows).await
}

/// Derives ids and signs badges for every new row. Rows whose email was
/// already seen, in this roster or in the event, are skipped and counted.
pub async fn import_participants(
    state: &AppState,
    event: &Event,
    rows: Vec<ImportedParticipant>,
) -> Result<ImportReport, AppError> {
    let received = rows.len();
    let created_at = Utc::now();
    let mut seen = HashSet::new();
    let mut batch = Vec::with_capacity(rows.len());

    for row in rows {
        let email = normalize_email(&row.email);
        if !seen.insert(email.clone()) {
            continue;
        }
        if state.participant_repo.email_exists(&event.id, &email).await? {
            continue;
        }
        let payload = ParticipantData {
            id: derive_participant_id(&row.first_name, &row.last_name, &email, &event.secret_key)?,
            first_name: row.first_name.trim().to_string(),
            last_name: row.last_name.trim().to_string(),
            company: row.company.trim().to_string(),
            email,
        };
        let qr_code_data = sign_participant(&payload, &event.secret_key)?;
        batch.push(Participant {
            id: payload.id,
            event_id: event.id.clone(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            company: payload.company,
            email: payload.email,
            qr_code_data,
            created_at,
        });
    }

    let imported = if batch.is_empty() {
        0
    } else {
        state
            .participant_repo
            .insert_participants(&event.id, &batch)
            .await
            .map_err(|err| storage_failure(state, "participant import", err))?
    };
    let report = ImportReport {
        received,
        imported,
        skipped_duplicates: received - imported,
    };

    state
        .metrics
        .record_import(report.imported, report.skipped_duplicates);
    if report.skipped_duplicates > 0 {
        warn!(
            event_id = %event.id,
            skipped = report.skipped_duplicates,
            "skipped participants with an email already on the roster"
        );
    }
    info!(
        event_id = %event.id,
        received = report.received,
        imported = report.imported,
        "roster imported"
    );
    Ok(report)
}

/// Deletes the event's whole roster along with its check-in history.
pub async fn purge_participants(state: &AppState, event_id: &str) -> Result<PurgeReport, AppError> {
    let event = load_event(state, event_id).await?;
    let report = state
        .participant_repo
        .delete_participants_by_event(&event.id)
        .await
        .map_err(|err| storage_failure(state, "participant purge", err))?;
    info!(
        event_id = %event.id,
        participants = report.participants,
        check_ins = report.check_ins,
        "participants purged"
    );
    Ok(report)
}
