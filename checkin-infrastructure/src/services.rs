pub mod csv_roster_parser;
pub mod health_service;
pub mod line_frame_source;

pub use csv_roster_parser::*;
pub use health_service::*;
pub use line_frame_source::*;
