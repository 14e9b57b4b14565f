pub mod event_queries;
pub mod history_queries;
pub mod participant_queries;
