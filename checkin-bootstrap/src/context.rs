use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{info, warn};

use checkin_application::ops::ParticipantLocks;
use checkin_application::{AppState, Metrics};
use checkin_domain::{EventRepository, SessionRepository};
use checkin_infrastructure::{
    AppConfig, CsvRosterParser, DefaultHealthService, LocalStore, SessionFileRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(&config).await
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let store = match &runtime_config.store_path {
            Some(path) => LocalStore::open(path).await?,
            None => {
                warn!("store_path is empty, check-ins are kept in memory only");
                LocalStore::in_memory()
            }
        };
        let store = Arc::new(store);
        store.ping().await?;

        let session_repo = Arc::new(SessionFileRepository::new(&runtime_config.session_path));
        let mut session = session_repo.load_session().await?;
        if let Some(event_id) = session.current_event_id.clone() {
            if store.get_event(&event_id).await?.is_none() {
                info!(event_id = %event_id, "selected event no longer exists, clearing selection");
                session.current_event_id = None;
            }
        }

        let state = AppState {
            config: runtime_config,
            event_repo: store.clone(),
            participant_repo: store.clone(),
            check_in_repo: store.clone(),
            session_repo: session_repo.clone(),
            roster_parser: Arc::new(CsvRosterParser::new()),
            health_service: Arc::new(DefaultHealthService::new(store, session_repo)),
            session: Arc::new(RwLock::new(session)),
            check_in_locks: Arc::new(ParticipantLocks::new()),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
