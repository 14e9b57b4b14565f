// Scan outcome value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    #[serde(rename = "valid")]
    FirstEntry,
    #[serde(rename = "duplicate")]
    RepeatEntry,
    #[serde(rename = "invalid")]
    Invalid,
}

impl ScanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanOutcome::FirstEntry => "valid",
            ScanOutcome::RepeatEntry => "duplicate",
            ScanOutcome::Invalid => "invalid",
        }
    }

    /// Text shown at the scanner. Invalid never says why.
    pub fn operator_message(&self) -> &'static str {
        match self {
            ScanOutcome::FirstEntry => "check-in recorded",
            ScanOutcome::RepeatEntry => "already checked in",
            ScanOutcome::Invalid => "invalid badge",
        }
    }
}
