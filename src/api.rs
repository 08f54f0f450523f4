//! Public API surface for the report computation crate.
//!
//! This file consolidates the DTO types handed to the formatting/export
//! layer. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::log::Dataset;
pub use crate::models::log::FlightLog;
pub use crate::models::log::LoggedMessage;
pub use crate::models::mode::FlightMode;
pub use crate::models::mode::ModeTransition;
pub use crate::models::params::DefaultSnapshot;
pub use crate::models::params::ParameterMetadata;
pub use crate::models::params::ParameterMetadataMap;
pub use crate::models::params::ParameterType;
pub use crate::models::time::LogTimestamp;
pub use crate::services::flight_stats::BatteryStats;
pub use crate::services::flight_stats::FlightStats;
pub use crate::services::flight_stats::ModeSplitStats;
pub use crate::services::flight_stats::ValueStats;
pub use crate::services::messages::MessageRow;
pub use crate::services::mode_stats::ModeAggregate;
pub use crate::services::mode_stats::PerModeStats;
pub use crate::services::param_diff::ParameterDiffEntry;
pub use crate::services::summary::ReportSummary;
pub use crate::services::summary::SummaryRow;
