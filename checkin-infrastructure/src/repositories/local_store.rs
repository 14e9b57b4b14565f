use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use checkin_domain::{
    normalize_email, CheckIn, CheckInRepository, Event, EventRepository, Participant,
    ParticipantRepository, PurgeReport, StoreError,
};

use crate::utils::{ensure_parent_dir, sibling_path, sync_parent_dir, write_atomically};

/// On-disk layout of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreSnapshot {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    participants: Vec<Participant>,
    #[serde(default)]
    check_ins: Vec<CheckIn>,
}

#[derive(Debug, Default, Clone)]
struct StoreData {
    events: BTreeMap<String, Event>,
    participants: HashMap<String, Participant>,
    by_qr_code: HashMap<String, String>,
    emails: HashSet<(String, String)>,
    check_ins: HashMap<String, Vec<CheckIn>>,
    check_in_ids: HashSet<String>,
}

impl StoreData {
    fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut data = StoreData::default();
        for event in snapshot.events {
            data.insert_event(event)?;
        }
        for participant in snapshot.participants {
            data.insert_participant(participant)?;
        }
        for check_in in snapshot.check_ins {
            data.insert_check_in(check_in)?;
        }
        Ok(data)
    }

    fn to_snapshot(&self) -> StoreSnapshot {
        let mut participants = self.participants.values().cloned().collect::<Vec<_>>();
        participants.sort_by(|a, b| {
            (&a.event_id, a.created_at, &a.id).cmp(&(&b.event_id, b.created_at, &b.id))
        });
        let mut check_ins = self
            .check_ins
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>();
        check_ins.sort_by(|a, b| (a.checked_in_at, &a.id).cmp(&(b.checked_in_at, &b.id)));
        StoreSnapshot {
            events: self.events.values().cloned().collect(),
            participants,
            check_ins,
        }
    }

    fn insert_event(&mut self, event: Event) -> Result<()> {
        if self.events.contains_key(&event.id) {
            return Err(StoreError::DuplicateEvent(event.id).into());
        }
        self.events.insert(event.id.clone(), event);
        Ok(())
    }

    fn email_key(participant: &Participant) -> (String, String) {
        (
            participant.event_id.clone(),
            normalize_email(&participant.email),
        )
    }

    fn insert_participant(&mut self, participant: Participant) -> Result<()> {
        if !self.events.contains_key(&participant.event_id) {
            return Err(StoreError::UnknownEvent(participant.event_id).into());
        }
        if self.participants.contains_key(&participant.id) {
            return Err(StoreError::DuplicateParticipant(participant.id).into());
        }
        if self.by_qr_code.contains_key(&participant.qr_code_data) {
            return Err(StoreError::DuplicateQrCode(participant.id).into());
        }
        self.emails.insert(Self::email_key(&participant));
        self.by_qr_code
            .insert(participant.qr_code_data.clone(), participant.id.clone());
        self.participants.insert(participant.id.clone(), participant);
        Ok(())
    }

    fn check_insertable(&self, check_in: &CheckIn) -> Result<()> {
        if !self.participants.contains_key(&check_in.participant_id) {
            return Err(StoreError::UnknownParticipant(check_in.participant_id.clone()).into());
        }
        if self.check_in_ids.contains(&check_in.id) {
            return Err(StoreError::DuplicateCheckIn(check_in.id.clone()).into());
        }
        Ok(())
    }

    fn insert_check_in(&mut self, check_in: CheckIn) -> Result<()> {
        self.check_insertable(&check_in)?;
        self.check_in_ids.insert(check_in.id.clone());
        self.check_ins
            .entry(check_in.participant_id.clone())
            .or_default()
            .push(check_in);
        Ok(())
    }

    fn remove_participant(&mut self, participant_id: &str) -> usize {
        let Some(participant) = self.participants.remove(participant_id) else {
            return 0;
        };
        self.by_qr_code.remove(&participant.qr_code_data);
        self.emails.remove(&Self::email_key(&participant));
        let check_ins = self.check_ins.remove(participant_id).unwrap_or_default();
        for check_in in &check_ins {
            self.check_in_ids.remove(&check_in.id);
        }
        check_ins.len()
    }
}

fn journal_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".journal")
}

/// Append-only JSON-lines log of check-ins recorded since the last snapshot.
struct Journal {
    path: PathBuf,
    file: Option<fs::File>,
    len: u64,
}

impl Journal {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: None,
            len: 0,
        }
    }

    async fn file(&mut self) -> Result<&mut fs::File> {
        if self.file.is_none() {
            ensure_parent_dir(&self.path).await?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            self.len = file.metadata().await?.len();
            sync_parent_dir(&self.path).await?;
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .context("check-in journal is not open")
    }

    /// Returns once the record is on disk. A failed append is cut back off so
    /// a later record never lands behind a partial line.
    async fn append(&mut self, check_in: &CheckIn) -> Result<()> {
        let mut line = serde_json::to_vec(check_in)?;
        line.push(b'\n');
        let len = self.len;
        let file = self.file().await?;
        let written = async {
            file.write_all(&line).await?;
            file.flush().await?;
            file.sync_data().await
        }
        .await;
        match written {
            Ok(()) => {
                self.len = len + line.len() as u64;
                Ok(())
            }
            Err(err) => {
                if let Err(cut) = file.set_len(len).await {
                    warn!(
                        path = %self.path.display(),
                        error = %cut,
                        "failed to cut partial journal record"
                    );
                }
                self.file = None;
                Err(err.into())
            }
        }
    }

    /// Called once a snapshot covering every journaled record is on disk.
    async fn reset(&mut self) {
        let Some(file) = self.file.as_ref() else {
            return;
        };
        let truncated = async {
            file.set_len(0).await?;
            file.sync_data().await
        }
        .await;
        match truncated {
            Ok(()) => self.len = 0,
            Err(err) => {
                // Replay skips records the snapshot already holds.
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to truncate check-in journal"
                );
                self.file = None;
            }
        }
    }
}

/// Folds journaled check-ins into `data`. Returns `None` when there is no
/// journal, otherwise the number of records applied.
async fn replay_journal(path: &Path, data: &mut StoreData) -> Result<Option<usize>> {
    if !fs::try_exists(path).await? {
        return Ok(None);
    }
    let content = fs::read(path).await?;
    let lines = content
        .split(|byte| *byte == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .collect::<Vec<_>>();
    let mut applied = 0;
    for (index, line) in lines.iter().enumerate() {
        let check_in: CheckIn = match serde_json::from_slice(line) {
            Ok(check_in) => check_in,
            Err(err) if index + 1 == lines.len() => {
                // Torn tail: the append never returned, so nobody saw it succeed.
                warn!(
                    path = %path.display(),
                    error = %err,
                    "dropping torn check-in journal record"
                );
                break;
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!(
                        "corrupt check-in journal {} at record {}",
                        path.display(),
                        index + 1
                    )
                });
            }
        };
        // Already in the snapshot, or purged after it was journaled.
        if data.check_insertable(&check_in).is_err() {
            continue;
        }
        data.insert_check_in(check_in)?;
        applied += 1;
    }
    Ok(Some(applied))
}

/// Offline-first store for events, rosters and check-ins.
///
/// Reads are served from memory. Check-ins are appended to a synced journal
/// and applied in place. Every other write is applied to a copy, flushed as a
/// full snapshot, and only then published, which also empties the journal.
/// Either way a failed flush leaves the visible state untouched.
///
/// Writers serialize on the journal mutex before touching `data`.
pub struct LocalStore {
    path: Option<PathBuf>,
    journal: Mutex<Option<Journal>>,
    data: RwLock<StoreData>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            journal: Mutex::new(None),
            data: RwLock::new(StoreData::default()),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut data = if fs::try_exists(&path).await? {
            let content = fs::read(&path).await?;
            let snapshot: StoreSnapshot = serde_json::from_slice(&content)?;
            StoreData::from_snapshot(snapshot)?
        } else {
            StoreData::default()
        };

        let journal_path = journal_path_for(&path);
        if let Some(applied) = replay_journal(&journal_path, &mut data).await? {
            if applied > 0 {
                write_atomically(&path, &serde_json::to_vec(&data.to_snapshot())?).await?;
            }
            fs::remove_file(&journal_path).await?;
            info!(path = %journal_path.display(), applied, "check-in journal compacted");
        }

        info!(
            path = %path.display(),
            events = data.events.len(),
            participants = data.participants.len(),
            "local store opened"
        );
        Ok(Self {
            path: Some(path),
            journal: Mutex::new(Some(Journal::new(journal_path))),
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn commit<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut StoreData) -> Result<T>,
    {
        let mut journal = self.journal.lock().await;
        let mut next = self.data.read().await.clone();
        let out = change(&mut next)?;
        if let Some(path) = &self.path {
            let content = serde_json::to_vec(&next.to_snapshot())?;
            write_atomically(path, &content).await?;
        }
        *self.data.write().await = next;
        if let Some(journal) = journal.as_mut() {
            journal.reset().await;
        }
        Ok(out)
    }
}

#[async_trait]
impl EventRepository for LocalStore {
    async fn insert_event(&self, event: &Event) -> Result<()> {
        let event = event.clone();
        self.commit(move |data| data.insert_event(event)).await
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let event = event.clone();
        self.commit(move |data| match data.events.get_mut(&event.id) {
            Some(existing) => {
                *existing = event;
                Ok(())
            }
            None => Err(StoreError::UnknownEvent(event.id).into()),
        })
        .await
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.data.read().await.events.get(event_id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.data.read().await.events.values().cloned().collect())
    }

    async fn ping(&self) -> Result<()> {
        match &self.path {
            Some(path) => ensure_parent_dir(path).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ParticipantRepository for LocalStore {
    async fn insert_participants(&self, event_id: &str, participants: &[Participant]) -> Result<usize> {
        let event_id = event_id.to_string();
        let participants = participants.to_vec();
        self.commit(move |data| {
            if !data.events.contains_key(&event_id) {
                return Err(StoreError::UnknownEvent(event_id).into());
            }
            let mut inserted = 0;
            for participant in participants {
                if participant.event_id != event_id {
                    return Err(StoreError::ForeignParticipant(participant.id).into());
                }
                if data.emails.contains(&StoreData::email_key(&participant)) {
                    continue;
                }
                data.insert_participant(participant)?;
                inserted += 1;
            }
            Ok(inserted)
        })
        .await
    }

    async fn email_exists(&self, event_id: &str, email: &str) -> Result<bool> {
        let key = (event_id.to_string(), normalize_email(email));
        Ok(self.data.read().await.emails.contains(&key))
    }

    async fn list_participants(&self, event_id: &str) -> Result<Vec<Participant>> {
        Ok(self
            .data
            .read()
            .await
            .participants
            .values()
            .filter(|participant| participant.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_by_qr_code(&self, qr_code_data: &str) -> Result<Option<Participant>> {
        let data = self.data.read().await;
        Ok(data
            .by_qr_code
            .get(qr_code_data)
            .and_then(|participant_id| data.participants.get(participant_id))
            .cloned())
    }

    async fn delete_participants_by_event(&self, event_id: &str) -> Result<PurgeReport> {
        let event_id = event_id.to_string();
        self.commit(move |data| {
            let ids = data
                .participants
                .values()
                .filter(|participant| participant.event_id == event_id)
                .map(|participant| participant.id.clone())
                .collect::<Vec<_>>();
            let mut report = PurgeReport::default();
            for participant_id in ids {
                report.check_ins += data.remove_participant(&participant_id);
                report.participants += 1;
            }
            Ok(report)
        })
        .await
    }
}

#[async_trait]
impl CheckInRepository for LocalStore {
    async fn insert_check_in(&self, check_in: &CheckIn) -> Result<()> {
        let mut journal = self.journal.lock().await;
        self.data.read().await.check_insertable(check_in)?;
        if let Some(journal) = journal.as_mut() {
            journal.append(check_in).await?;
        }
        self.data.write().await.insert_check_in(check_in.clone())
    }

    async fn list_check_ins_by_participant(&self, participant_id: &str) -> Result<Vec<CheckIn>> {
        Ok(self
            .data
            .read()
            .await
            .check_ins
            .get(participant_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_ins_by_participants(&self, participant_ids: &[String]) -> Result<Vec<CheckIn>> {
        let data = self.data.read().await;
        Ok(participant_ids
            .iter()
            .filter_map(|participant_id| data.check_ins.get(participant_id))
            .flatten()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn event(id: &str) -> Event {
        let now = Utc::now();
        Event {
            id: id.to_string(),
            name: format!("Event {id}"),
            description: None,
            secret_key: "00".repeat(32),
            created_at: now,
            updated_at: now,
        }
    }

    fn participant(id: &str, event_id: &str, email: &str) -> Participant {
        Participant {
            id: id.to_string(),
            event_id: event_id.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            company: String::new(),
            email: email.to_string(),
            qr_code_data: format!("qr-{id}"),
            created_at: Utc::now(),
        }
    }

    fn check_in(id: &str, participant_id: &str) -> CheckIn {
        CheckIn {
            id: id.to_string(),
            participant_id: participant_id.to_string(),
            scanner_name: "Desk".to_string(),
            scanner_email: None,
            checked_in_at: Utc::now(),
            is_duplicate: false,
        }
    }

    #[tokio::test]
    async fn email_is_unique_per_event_only() {
        let store = LocalStore::in_memory();
        store.insert_event(&event("e1")).await.expect("event");
        store.insert_event(&event("e2")).await.expect("event");

        let first = store
            .insert_participants(
                "e1",
                &[participant("p1", "e1", "a@x.com"), participant("p2", "e1", "A@X.com ")],
            )
            .await
            .expect("insert");
        assert_eq!(first, 1);
        assert!(store.email_exists("e1", " a@X.COM").await.expect("exists"));

        let other_event = store
            .insert_participants("e2", &[participant("p3", "e2", "a@x.com")])
            .await
            .expect("insert");
        assert_eq!(other_event, 1);
    }

    #[tokio::test]
    async fn qr_code_collision_rejects_whole_batch() {
        let store = LocalStore::in_memory();
        store.insert_event(&event("e1")).await.expect("event");
        store
            .insert_participants("e1", &[participant("p1", "e1", "a@x.com")])
            .await
            .expect("insert");

        let mut clash = participant("p2", "e1", "b@x.com");
        clash.qr_code_data = "qr-p1".to_string();
        let err = store
            .insert_participants("e1", &[participant("p3", "e1", "c@x.com"), clash])
            .await
            .expect_err("reject");
        assert!(err.to_string().contains("already issued"));
        assert_eq!(store.list_participants("e1").await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn check_in_requires_known_participant() {
        let store = LocalStore::in_memory();
        let err = store
            .insert_check_in(&check_in("c1", "ghost"))
            .await
            .expect_err("reject");
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn purge_cascades_to_check_ins_of_that_event() {
        let store = LocalStore::in_memory();
        store.insert_event(&event("e1")).await.expect("event");
        store.insert_event(&event("e2")).await.expect("event");
        store
            .insert_participants("e1", &[participant("p1", "e1", "a@x.com")])
            .await
            .expect("insert");
        store
            .insert_participants("e2", &[participant("p2", "e2", "a@x.com")])
            .await
            .expect("insert");
        store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
        store.insert_check_in(&check_in("c2", "p1")).await.expect("check-in");
        store.insert_check_in(&check_in("c3", "p2")).await.expect("check-in");

        let report = store.delete_participants_by_event("e1").await.expect("purge");
        assert_eq!(
            report,
            PurgeReport {
                participants: 1,
                check_ins: 2
            }
        );
        assert!(store.find_by_qr_code("qr-p1").await.expect("lookup").is_none());
        assert!(!store.email_exists("e1", "a@x.com").await.expect("exists"));
        assert_eq!(
            store
                .list_check_ins_by_participant("p2")
                .await
                .expect("list")
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        {
            let store = LocalStore::open(&path).await.expect("open");
            store.insert_event(&event("e1")).await.expect("event");
            store
                .insert_participants("e1", &[participant("p1", "e1", "a@x.com")])
                .await
                .expect("insert");
            store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
        }

        let reopened = LocalStore::open(&path).await.expect("reopen");
        assert!(reopened.get_event("e1").await.expect("get").is_some());
        let found = reopened
            .find_by_qr_code("qr-p1")
            .await
            .expect("lookup")
            .expect("participant");
        assert_eq!(found.id, "p1");
        assert_eq!(
            reopened
                .list_check_ins_by_participant("p1")
                .await
                .expect("list")
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn failed_flush_leaves_state_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data_dir = dir.path().join("data");
        let store = LocalStore::open(data_dir.join("store.json"))
            .await
            .expect("open");
        store.insert_event(&event("e1")).await.expect("event");
        store
            .insert_participants("e1", &[participant("p1", "e1", "a@x.com")])
            .await
            .expect("insert");

        std::fs::remove_dir_all(&data_dir).expect("remove data dir");
        std::fs::write(&data_dir, b"file").expect("blocker");

        assert!(store.insert_event(&event("e2")).await.is_err());
        assert!(store.get_event("e2").await.expect("get").is_none());
        assert!(store.insert_check_in(&check_in("c1", "p1")).await.is_err());
        assert!(store
            .list_check_ins_by_participant("p1")
            .await
            .expect("list")
            .is_empty());
    }

    async fn seeded_store(path: &Path) -> LocalStore {
        let store = LocalStore::open(path).await.expect("open");
        store.insert_event(&event("e1")).await.expect("event");
        store
            .insert_participants("e1", &[participant("p1", "e1", "a@x.com")])
            .await
            .expect("insert");
        store
    }

    fn journal_records(path: &Path) -> usize {
        std::fs::read_to_string(journal_path_for(path))
            .map(|content| content.lines().count())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn check_ins_append_to_journal_without_rewriting_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let store = seeded_store(&path).await;
        let snapshot = std::fs::read(&path).expect("snapshot");

        store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
        store.insert_check_in(&check_in("c2", "p1")).await.expect("check-in");

        assert_eq!(std::fs::read(&path).expect("snapshot"), snapshot);
        assert_eq!(journal_records(&path), 2);
        assert_eq!(
            store
                .list_check_ins_by_participant("p1")
                .await
                .expect("list")
                .len(),
            2
        );
        assert!(store
            .insert_check_in(&check_in("c1", "p1"))
            .await
            .is_err());
        assert_eq!(journal_records(&path), 2);
    }

    #[tokio::test]
    async fn snapshot_write_empties_journal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let store = seeded_store(&path).await;
        store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
        assert_eq!(journal_records(&path), 1);

        store.insert_event(&event("e2")).await.expect("event");
        assert_eq!(journal_records(&path), 0);
        drop(store);

        let reopened = LocalStore::open(&path).await.expect("reopen");
        assert_eq!(
            reopened
                .list_check_ins_by_participant("p1")
                .await
                .expect("list")
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn reopen_replays_and_compacts_journal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        {
            let store = seeded_store(&path).await;
            store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
        }

        let reopened = LocalStore::open(&path).await.expect("reopen");
        assert!(!journal_path_for(&path).exists());
        let snapshot: StoreSnapshot =
            serde_json::from_slice(&std::fs::read(&path).expect("snapshot")).expect("parse");
        assert_eq!(snapshot.check_ins.len(), 1);
        assert_eq!(
            reopened
                .list_check_ins_by_participant("p1")
                .await
                .expect("list")[0]
                .id,
            "c1"
        );
    }

    #[tokio::test]
    async fn torn_journal_tail_is_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        {
            let store = seeded_store(&path).await;
            store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
        }
        let mut journal = std::fs::read(journal_path_for(&path)).expect("journal");
        journal.extend_from_slice(br#"{"id":"c2","participant_id":"p"#);
        std::fs::write(journal_path_for(&path), journal).expect("tear");

        let reopened = LocalStore::open(&path).await.expect("reopen");
        let check_ins = reopened
            .list_check_ins_by_participant("p1")
            .await
            .expect("list");
        assert_eq!(check_ins.len(), 1);
        assert_eq!(check_ins[0].id, "c1");
    }

    #[tokio::test]
    async fn corrupt_journal_record_before_tail_fails_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let record = {
            let store = seeded_store(&path).await;
            store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
            std::fs::read(journal_path_for(&path)).expect("journal")
        };
        let mut journal = b"not json\n".to_vec();
        journal.extend_from_slice(&record);
        std::fs::write(journal_path_for(&path), journal).expect("corrupt");

        let err = LocalStore::open(&path).await.err().expect("open must fail");
        assert!(err.to_string().contains("corrupt check-in journal"));
    }

    #[tokio::test]
    async fn journaled_check_ins_of_purged_participants_stay_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let record = {
            let store = seeded_store(&path).await;
            store.insert_check_in(&check_in("c1", "p1")).await.expect("check-in");
            let record = std::fs::read(journal_path_for(&path)).expect("journal");
            store.delete_participants_by_event("e1").await.expect("purge");
            record
        };
        // A journal left behind by a truncation that never landed.
        std::fs::write(journal_path_for(&path), record).expect("stale journal");

        let reopened = LocalStore::open(&path).await.expect("reopen");
        assert!(reopened
            .list_check_ins_by_participant("p1")
            .await
            .expect("list")
            .is_empty());
    }
}
