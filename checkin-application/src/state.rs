use std::sync::Arc;

use checkin_domain::ports::{
    CheckInRepository, EventRepository, HealthCheckService, ParticipantRepository,
    RosterParser, SessionRepository,
};
use checkin_domain::{RuntimeConfig, SessionState};
use tokio::sync::RwLock;

use crate::ops::ParticipantLocks;
use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub participant_repo: Arc<dyn ParticipantRepository>,
    pub check_in_repo: Arc<dyn CheckInRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub roster_parser: Arc<dyn RosterParser>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub session: Arc<RwLock<SessionState>>,
    pub check_in_locks: Arc<ParticipantLocks>,
    pub metrics: Arc<Metrics>,
}
