use checkin_domain::RosterError;
use thiserror::Error;

use crate::credentials::CredentialError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A write did not land; nothing from the operation is committed.
    #[error("storage write failed: {0}")]
    Storage(anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<RosterError> for AppError {
    fn from(value: RosterError) -> Self {
        AppError::BadRequest(value.to_string())
    }
}

impl From<CredentialError> for AppError {
    fn from(value: CredentialError) -> Self {
        AppError::Internal(value.into())
    }
}
