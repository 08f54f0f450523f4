//! Domain models shared across the report computation services.

pub mod log;
pub mod mode;
pub mod params;
pub mod time;
