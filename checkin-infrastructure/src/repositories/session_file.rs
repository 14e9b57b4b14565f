use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use checkin_domain::{SessionRepository, SessionState};

use crate::utils::write_atomically;

/// Keeps the selected event and scanner operator in a small TOML file.
pub struct SessionFileRepository {
    path: PathBuf,
}

impl SessionFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionRepository for SessionFileRepository {
    async fn load_session(&self) -> anyhow::Result<SessionState> {
        if !fs::try_exists(&self.path).await? {
            return Ok(SessionState::default());
        }
        let content = fs::read_to_string(&self.path).await?;
        let session: SessionState = toml::from_str(&content)?;
        Ok(session)
    }

    async fn save_session(&self, session: &SessionState) -> anyhow::Result<()> {
        let content = toml::to_string(session)?;
        write_atomically(&self.path, content.as_bytes()).await
    }
}
