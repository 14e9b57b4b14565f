use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

const PRUNE_THRESHOLD: usize = 1024;

/// One async mutex per participant id, held across the duplicate check and
/// the check-in insert. Different participants never share a mutex.
#[derive(Debug, Default)]
pub struct ParticipantLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ParticipantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, participant_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            if locks.len() >= PRUNE_THRESHOLD {
                // Entries only referenced by the map are idle.
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks
                .entry(participant_id.to_string())
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }
}
