use async_trait::async_trait;

use crate::entities::ImportedParticipant;
use crate::error::RosterError;
use crate::value_objects::Capture;

pub trait RosterParser: Send + Sync {
    fn parse(&self, content: &[u8]) -> Result<Vec<ImportedParticipant>, RosterError>;
}

/// Black-box QR decoder: camera, handheld scanner or test double.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn capture(&self) -> anyhow::Result<Capture>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_storage(&self) -> anyhow::Result<bool>;
    async fn check_session_store(&self) -> anyhow::Result<bool>;
}
