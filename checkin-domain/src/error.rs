use thiserror::Error;

/// Reasons a roster file is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("roster has no header row")]
    MissingHeader,
    #[error("missing required columns: first name and last name (row {row})")]
    MissingNames { row: usize },
    #[error("email column required to keep participants unique (row {row})")]
    MissingEmail { row: usize },
    #[error("unreadable roster: {0}")]
    Unreadable(String),
}

/// Constraint violations reported by a store. Carried inside `anyhow::Error`
/// so callers can tell a rejected write from an I/O failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("event '{0}' already exists")]
    DuplicateEvent(String),
    #[error("event '{0}' does not exist")]
    UnknownEvent(String),
    #[error("participant '{0}' belongs to another event")]
    ForeignParticipant(String),
    #[error("participant id '{0}' already exists")]
    DuplicateParticipant(String),
    #[error("badge payload of participant '{0}' is already issued")]
    DuplicateQrCode(String),
    #[error("participant '{0}' does not exist")]
    UnknownParticipant(String),
    #[error("check-in '{0}' already exists")]
    DuplicateCheckIn(String),
}
