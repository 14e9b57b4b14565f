use std::sync::atomic::{AtomicU64, Ordering};

use checkin_domain::ScanOutcome;

#[derive(Debug, Default)]
pub struct Metrics {
    scans: AtomicU64,
    first_entries: AtomicU64,
    repeat_entries: AtomicU64,
    invalid_scans: AtomicU64,
    imported_participants: AtomicU64,
    skipped_duplicates: AtomicU64,
    storage_errors: AtomicU64,
}

impl Metrics {
    pub fn record_scan(&self, outcome: ScanOutcome) {
        self.scans.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            ScanOutcome::FirstEntry => &self.first_entries,
            ScanOutcome::RepeatEntry => &self.repeat_entries,
            ScanOutcome::Invalid => &self.invalid_scans,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_import(&self, imported: usize, skipped: usize) {
        self.imported_participants
            .fetch_add(imported as u64, Ordering::Relaxed);
        self.skipped_duplicates
            .fetch_add(skipped as u64, Ordering::Relaxed);
    }

    pub fn record_storage_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let scans = self.scans.load(Ordering::Relaxed);
        let first = self.first_entries.load(Ordering::Relaxed);
        let repeat = self.repeat_entries.load(Ordering::Relaxed);
        let invalid = self.invalid_scans.load(Ordering::Relaxed);
        let imported = self.imported_participants.load(Ordering::Relaxed);
        let skipped = self.skipped_duplicates.load(Ordering::Relaxed);
        let storage_errors = self.storage_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE checkin_scans_total counter\n\
checkin_scans_total {}\n\
# TYPE checkin_first_entries_total counter\n\
checkin_first_entries_total {}\n\
# TYPE checkin_repeat_entries_total counter\n\
checkin_repeat_entries_total {}\n\
# TYPE checkin_invalid_scans_total counter\n\
checkin_invalid_scans_total {}\n\
# TYPE checkin_imported_participants_total counter\n\
checkin_imported_participants_total {}\n\
# TYPE checkin_skipped_duplicates_total counter\n\
checkin_skipped_duplicates_total {}\n\
# TYPE checkin_storage_errors_total counter\n\
checkin_storage_errors_total {}\n",
            scans, first, repeat, invalid, imported, skipped, storage_errors
        )
    }
}
