// Session entity
// Current event and scanner operator, persisted between runs

use serde::{Deserialize, Serialize};

use crate::entities::{Event, EventSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner: Option<ScannerInfo>,
}

/// Everything the decision engine needs for one scan.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub event: Event,
    pub scanner: ScannerInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub current_event: Option<EventSummary>,
    pub scanner: Option<ScannerInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectEventRequest {
    #[serde(default)]
    pub event_id: Option<String>,
}
