use checkin_domain::{normalize_optional_text, ScannerInfo, SessionState, SessionView};
use tracing::info;

use crate::commands::{normalize_required_text, storage_failure};
use crate::queries::event_queries::{self, load_event};
use crate::{AppError, AppState};

/// Selects the event used for scanning; `None` clears the selection.
pub async fn select_event(
    state: &AppState,
    event_id: Option<String>,
) -> Result<SessionView, AppError> {
    let event_id = normalize_optional_text(event_id);
    if let Some(event_id) = event_id.as_deref() {
        load_event(state, event_id).await?;
    }
    set_current_event(state, event_id).await?;
    event_queries::get_session(state).await
}

pub async fn set_scanner(state: &AppState, scanner: ScannerInfo) -> Result<ScannerInfo, AppError> {
    let scanner = ScannerInfo {
        name: normalize_required_text(scanner.name, "name")?,
        email: normalize_optional_text(scanner.email),
    };
    let stored = scanner.clone();
    update_session(state, move |session| session.scanner = Some(stored)).await?;
    info!(scanner = %scanner.name, "scanner identity set");
    Ok(scanner)
}

pub async fn clear_scanner(state: &AppState) -> Result<(), AppError> {
    update_session(state, |session| session.scanner = None).await?;
    Ok(())
}

pub(crate) async fn set_current_event(
    state: &AppState,
    event_id: Option<String>,
) -> Result<(), AppError> {
    update_session(state, move |session| session.current_event_id = event_id).await?;
    Ok(())
}

/// Applies `change` and persists it; memory only moves once the save landed.
async fn update_session<F>(state: &AppState, change: F) -> Result<SessionState, AppError>
where
    F: FnOnce(&mut SessionState),
{
    let mut session = state.session.write().await;
    let mut next = session.clone();
    change(&mut next);
    state
        .session_repo
        .save_session(&next)
        .await
        .map_err(|err| storage_failure(state, "session save", err))?;
    *session = next.clone();
    Ok(next)
}
