use async_trait::async_trait;

use crate::entities::{CheckIn, Event, Participant, PurgeReport, SessionState};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert_event(&self, event: &Event) -> anyhow::Result<()>;
    async fn update_event(&self, event: &Event) -> anyhow::Result<()>;
    async fn get_event(&self, event_id: &str) -> anyhow::Result<Option<Event>>;
    async fn list_events(&self) -> anyhow::Result<Vec<Event>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Inserts every participant whose email is not yet taken within the event.
    /// Returns how many were inserted.
    async fn insert_participants(
        &self,
        event_id: &str,
        participants: &[Participant],
    ) -> anyhow::Result<usize>;
    async fn email_exists(&self, event_id: &str, email: &str) -> anyhow::Result<bool>;
    async fn list_participants(&self, event_id: &str) -> anyhow::Result<Vec<Participant>>;
    async fn find_by_qr_code(&self, qr_code_data: &str) -> anyhow::Result<Option<Participant>>;
    /// Removes the event's participants together with their check-ins.
    async fn delete_participants_by_event(&self, event_id: &str) -> anyhow::Result<PurgeReport>;
}

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    async fn insert_check_in(&self, check_in: &CheckIn) -> anyhow::Result<()>;
    async fn list_check_ins_by_participant(
        &self,
        participant_id: &str,
    ) -> anyhow::Result<Vec<CheckIn>>;
    async fn list_check_ins_by_participants(
        &self,
        participant_ids: &[String],
    ) -> anyhow::Result<Vec<CheckIn>>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn load_session(&self) -> anyhow::Result<SessionState>;
    async fn save_session(&self, session: &SessionState) -> anyhow::Result<()>;
}
