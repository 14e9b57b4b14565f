// Domain entities

pub mod check_in;
pub mod event;
pub mod participant;
pub mod roster;
pub mod runtime_config;
pub mod session;

pub use check_in::*;
pub use event::*;
pub use participant::*;
pub use roster::*;
pub use runtime_config::*;
pub use session::*;
