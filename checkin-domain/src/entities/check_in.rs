// Check-in entity
// One record per accepted scan, duplicates included

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::ParticipantData;
use crate::value_objects::ScanOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: String,
    pub participant_id: String,
    pub scanner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner_email: Option<String>,
    pub checked_in_at: DateTime<Utc>,
    pub is_duplicate: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub qr_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub status: ScanOutcome,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<ParticipantData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<CheckIn>,
}

impl ScanResult {
    pub fn invalid() -> Self {
        Self {
            status: ScanOutcome::Invalid,
            message: ScanOutcome::Invalid.operator_message().to_string(),
            participant: None,
            check_in: None,
        }
    }

    pub fn recorded(participant: ParticipantData, check_in: CheckIn) -> Self {
        let status = if check_in.is_duplicate {
            ScanOutcome::RepeatEntry
        } else {
            ScanOutcome::FirstEntry
        };
        Self {
            status,
            message: status.operator_message().to_string(),
            participant: Some(participant),
            check_in: Some(check_in),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryParticipant {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInHistoryEntry {
    pub id: String,
    pub checked_in_at: DateTime<Utc>,
    pub scanner_name: String,
    pub scanner_email: Option<String>,
    pub is_duplicate: bool,
    pub participant: HistoryParticipant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckInStats {
    pub total: usize,
    pub valid: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInHistory {
    pub stats: CheckInStats,
    pub entries: Vec<CheckInHistoryEntry>,
}
