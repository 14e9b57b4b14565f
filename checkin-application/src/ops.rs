pub mod participant_locks;
pub mod scan_loop;

pub use participant_locks::ParticipantLocks;
pub use scan_loop::{run_scan_session, NextCode, ScanLoop, ScanSessionEnd};
