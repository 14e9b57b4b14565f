pub mod check_in_commands;
pub mod event_commands;
pub mod participant_commands;
pub mod session_commands;

use tracing::error;

use crate::{AppError, AppState};

/// Logs and counts a failed write before surfacing it.
pub(crate) fn storage_failure(state: &AppState, action: &str, err: anyhow::Error) -> AppError {
    error!("{} failed: {:#}", action, err);
    state.metrics.record_storage_error();
    AppError::Storage(err)
}

pub(crate) fn normalize_required_text(value: String, field: &str) -> Result<String, AppError> {
    checkin_domain::normalize_optional_text(Some(value))
        .ok_or_else(|| AppError::BadRequest(format!("{} must not be empty", field)))
}
