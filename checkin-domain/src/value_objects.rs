// Domain value objects
pub mod capture;
pub mod scan_outcome;

pub use capture::*;
pub use scan_outcome::*;
