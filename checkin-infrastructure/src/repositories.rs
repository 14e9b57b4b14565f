pub mod local_store;
pub mod session_file;

pub use local_store::*;
pub use session_file::*;
