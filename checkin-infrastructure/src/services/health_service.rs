use std::sync::Arc;

use async_trait::async_trait;
use checkin_domain::ports::HealthCheckService;
use checkin_domain::{EventRepository, SessionRepository};

pub struct DefaultHealthService {
    event_repo: Arc<dyn EventRepository>,
    session_repo: Arc<dyn SessionRepository>,
}

impl DefaultHealthService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            event_repo,
            session_repo,
        }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_storage(&self) -> anyhow::Result<bool> {
        self.event_repo.ping().await.map(|_| true)
    }

    async fn check_session_store(&self) -> anyhow::Result<bool> {
        self.session_repo.load_session().await.map(|_| true)
    }
}
