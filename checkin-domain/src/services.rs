// Pure domain services
pub mod roster_mapper;

pub use roster_mapper::*;
