// In-memory ports for driving commands without a store on disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use checkin_domain::ports::{
    CheckInRepository, EventRepository, HealthCheckService, ParticipantRepository,
    RosterParser, SessionRepository,
};
use checkin_domain::{
    CheckIn, Event, ImportedParticipant, Participant, PurgeReport, RosterError, RuntimeConfig,
    ScannerInfo, SessionState, StoreError,
};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::credentials;
use crate::ops::ParticipantLocks;
use crate::{AppState, Metrics};

#[derive(Default)]
pub(crate) struct MemoryStore {
    events: Mutex<HashMap<String, Event>>,
    participants: Mutex<Vec<Participant>>,
    check_ins: Mutex<Vec<CheckIn>>,
    session: Mutex<SessionState>,
    writing: AtomicBool,
    purge_on_history_read: AtomicBool,
}

impl MemoryStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn add_event(&self, event: &Event) {
        self.events
            .lock()
            .unwrap()
            .insert(event.id.clone(), event.clone());
    }

    pub(crate) fn add_participant(&self, participant: &Participant) {
        self.participants.lock().unwrap().push(participant.clone());
    }

    pub(crate) fn add_check_in(&self, check_in: CheckIn) {
        self.check_ins.lock().unwrap().push(check_in);
    }

    pub(crate) fn check_in_count(&self) -> usize {
        self.check_ins.lock().unwrap().len()
    }

    /// True while a check-in insert is in progress.
    pub(crate) fn is_writing(&self) -> bool {
        self.writing.load(Ordering::SeqCst)
    }

    /// The next read of a participant's check-ins drops every participant,
    /// as a purge landing right after the badge lookup would.
    pub(crate) fn purge_on_next_history_read(&self) {
        self.purge_on_history_read.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn insert_event(&self, event: &Event) -> anyhow::Result<()> {
        self.add_event(event);
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> anyhow::Result<()> {
        self.add_event(event);
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> anyhow::Result<Option<Event>> {
        Ok(self.events.lock().unwrap().get(event_id).cloned())
    }

    async fn list_events(&self) -> anyhow::Result<Vec<Event>> {
        Ok(self.events.lock().unwrap().values().cloned().collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ParticipantRepository for MemoryStore {
    async fn insert_participants(
        &self,
        _event_id: &str,
        participants: &[Participant],
    ) -> anyhow::Result<usize> {
        self.participants
            .lock()
            .unwrap()
            .extend(participants.iter().cloned());
        Ok(participants.len())
    }

    async fn email_exists(&self, event_id: &str, email: &str) -> anyhow::Result<bool> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .any(|participant| participant.event_id == event_id && participant.email == email))
    }

    async fn list_participants(&self, event_id: &str) -> anyhow::Result<Vec<Participant>> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .filter(|participant| participant.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_by_qr_code(&self, qr_code_data: &str) -> anyhow::Result<Option<Participant>> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .find(|participant| participant.qr_code_data == qr_code_data)
            .cloned())
    }

    async fn delete_participants_by_event(&self, event_id: &str) -> anyhow::Result<PurgeReport> {
        let mut participants = self.participants.lock().unwrap();
        let before = participants.len();
        participants.retain(|participant| participant.event_id != event_id);
        Ok(PurgeReport {
            participants: before - participants.len(),
            check_ins: 0,
        })
    }
}

#[async_trait]
impl CheckInRepository for MemoryStore {
    async fn insert_check_in(&self, check_in: &CheckIn) -> anyhow::Result<()> {
        self.writing.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.writing.store(false, Ordering::SeqCst);

        let known = self
            .participants
            .lock()
            .unwrap()
            .iter()
            .any(|participant| participant.id == check_in.participant_id);
        if !known {
            return Err(StoreError::UnknownParticipant(check_in.participant_id.clone()).into());
        }
        self.add_check_in(check_in.clone());
        Ok(())
    }

    async fn list_check_ins_by_participant(
        &self,
        participant_id: &str,
    ) -> anyhow::Result<Vec<CheckIn>> {
        if self.purge_on_history_read.swap(false, Ordering::SeqCst) {
            self.participants.lock().unwrap().clear();
        }
        Ok(self
            .check_ins
            .lock()
            .unwrap()
            .iter()
            .filter(|check_in| check_in.participant_id == participant_id)
            .cloned()
            .collect())
    }

    async fn list_check_ins_by_participants(
        &self,
        participant_ids: &[String],
    ) -> anyhow::Result<Vec<CheckIn>> {
        Ok(self
            .check_ins
            .lock()
            .unwrap()
            .iter()
            .filter(|check_in| participant_ids.contains(&check_in.participant_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn load_session(&self) -> anyhow::Result<SessionState> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save_session(&self, session: &SessionState) -> anyhow::Result<()> {
        *self.session.lock().unwrap() = session.clone();
        Ok(())
    }
}

#[async_trait]
impl HealthCheckService for MemoryStore {
    async fn check_storage(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn check_session_store(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}

struct NoRoster;

impl RosterParser for NoRoster {
    fn parse(&self, _content: &[u8]) -> Result<Vec<ImportedParticipant>, RosterError> {
        Err(RosterError::MissingHeader)
    }
}

pub(crate) fn state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        config: RuntimeConfig::default(),
        event_repo: store.clone(),
        participant_repo: store.clone(),
        check_in_repo: store.clone(),
        session_repo: store.clone(),
        roster_parser: Arc::new(NoRoster),
        health_service: store,
        session: Arc::new(RwLock::new(SessionState::default())),
        check_in_locks: Arc::new(ParticipantLocks::new()),
        metrics: Arc::new(Metrics::default()),
    }
}

pub(crate) fn event(id: &str) -> Event {
    let now = Utc::now();
    Event {
        id: id.to_string(),
        name: format!("Event {id}"),
        description: None,
        secret_key: credentials::generate_secret_key(),
        created_at: now,
        updated_at: now,
    }
}

/// A roster entry whose badge verifies against `event`.
pub(crate) fn badge_holder(event: &Event, first_name: &str, last_name: &str, email: &str) -> Participant {
    let id = credentials::derive_participant_id(first_name, last_name, email, &event.secret_key)
        .unwrap();
    let mut participant = Participant {
        id,
        event_id: event.id.clone(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        company: String::new(),
        email: email.to_string(),
        qr_code_data: String::new(),
        created_at: Utc::now(),
    };
    participant.qr_code_data =
        credentials::sign_participant(&participant.credential_payload(), &event.secret_key)
            .unwrap();
    participant
}

/// Selects `event` and a scanner operator, ready for scanning.
pub(crate) async fn select(state: &AppState, event: &Event) {
    *state.session.write().await = SessionState {
        current_event_id: Some(event.id.clone()),
        scanner: Some(ScannerInfo {
            name: "Desk 1".to_string(),
            email: None,
        }),
    };
}
