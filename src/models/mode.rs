use crate::models::time::LogTimestamp;
use serde::{Deserialize, Serialize};

/// Flight mode of a VTOL vehicle.
///
/// Logs encode the mode as a raw integer; [`FlightMode::from_raw`] maps that
/// encoding. Telemetry recorded before the first transition carries no mode
/// and is attributed to [`FlightMode::Undefined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightMode {
    Undefined,
    Transition,
    FixedWing,
    Multicopter,
}

impl FlightMode {
    /// Map the raw log encoding to a mode.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => FlightMode::Transition,
            2 => FlightMode::FixedWing,
            3 => FlightMode::Multicopter,
            _ => FlightMode::Undefined,
        }
    }

    /// Short display label used in report rows ("MC", "FW").
    pub fn label(&self) -> &'static str {
        match self {
            FlightMode::Undefined => "?",
            FlightMode::Transition => "TRANS",
            FlightMode::FixedWing => "FW",
            FlightMode::Multicopter => "MC",
        }
    }
}

impl Default for FlightMode {
    fn default() -> Self {
        FlightMode::Undefined
    }
}

/// A recorded change of flight mode, effective from its timestamp until the
/// next transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTransition {
    pub timestamp: LogTimestamp,
    pub mode: FlightMode,
}

impl ModeTransition {
    pub fn new(timestamp: impl Into<LogTimestamp>, mode: FlightMode) -> Self {
        Self {
            timestamp: timestamp.into(),
            mode,
        }
    }
}
