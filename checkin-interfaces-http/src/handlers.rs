pub mod event_handlers;
pub mod history_handlers;
pub mod ops_handlers;
pub mod participant_handlers;
pub mod scan_handlers;
pub mod session_handlers;

pub use event_handlers::*;
pub use history_handlers::*;
pub use ops_handlers::*;
pub use participant_handlers::*;
pub use scan_handlers::*;
pub use session_handlers::*;
