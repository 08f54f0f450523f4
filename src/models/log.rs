// ============================================================================
// Flight log input model
// ============================================================================
//
// The log reader collaborator hands an already-parsed flight log across as
// materialized, in-memory data. This module defines that shape plus a JSON
// interchange loader for out-of-process readers. Log *format* parsing (ULog
// framing, message decoding) does not happen here.

use crate::models::mode::ModeTransition;
use crate::models::params::DefaultSnapshot;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One logged topic instance: a timestamp column plus named f64 columns,
/// all of equal length, timestamp-ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    #[serde(default)]
    pub instance: usize,
    pub timestamps: Vec<u64>,
    #[serde(default)]
    pub fields: HashMap<String, Vec<f64>>,
}

impl Dataset {
    /// Column values for a field, if logged.
    pub fn field(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(|v| v.as_slice())
    }
}

/// A logged text message (or event) with its severity label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedMessage {
    pub timestamp: u64,
    pub level: String,
    pub message: String,
}

/// A fully materialized flight log, as produced by the log reader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightLog {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    /// One-shot info messages (sys_name, ver_hw, ver_sw, sys_uuid, ...).
    #[serde(default)]
    pub msg_info: HashMap<String, String>,
    /// Parameter values active at log start, keyed by name.
    #[serde(default)]
    pub initial_parameters: BTreeMap<String, f64>,
    /// System-level default parameter snapshot, when the log carries one.
    #[serde(default)]
    pub system_defaults: Option<DefaultSnapshot>,
    /// Airframe-level default parameter snapshot, when the log carries one.
    #[serde(default)]
    pub airframe_defaults: Option<DefaultSnapshot>,
    #[serde(default)]
    pub logged_messages: Vec<LoggedMessage>,
    /// Structured events, already rendered to (timestamp, level, message).
    #[serde(default)]
    pub logged_events: Vec<LoggedMessage>,
    /// VTOL mode transition timeline; `None` for non-VTOL vehicles.
    #[serde(default)]
    pub vtol_transitions: Option<Vec<ModeTransition>>,
    /// Logger dropout durations in milliseconds.
    #[serde(default)]
    pub dropout_durations_ms: Vec<u64>,
    pub start_timestamp: u64,
    pub last_timestamp: u64,
}

impl FlightLog {
    /// First instance of a dataset by topic name.
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// A specific instance of a multi-instance dataset.
    pub fn dataset_instance(&self, name: &str, instance: usize) -> Option<&Dataset> {
        self.datasets
            .iter()
            .find(|d| d.name == name && d.instance == instance)
    }

    /// Number of logged instances of a topic.
    pub fn instance_count(&self, name: &str) -> usize {
        self.datasets.iter().filter(|d| d.name == name).count()
    }

    pub fn has_dataset(&self, name: &str) -> bool {
        self.datasets.iter().any(|d| d.name == name)
    }

    /// Logging duration in whole seconds.
    pub fn logging_duration_secs(&self) -> u64 {
        self.last_timestamp.saturating_sub(self.start_timestamp) / 1_000_000
    }
}

fn validate_input_log(log_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(log_json).context("Invalid flight log JSON")?;
    let has_datasets = value
        .as_object()
        .and_then(|obj| obj.get("datasets"))
        .is_some();
    if !has_datasets {
        anyhow::bail!("Missing required 'datasets' field");
    }
    Ok(())
}

/// Parse a materialized flight log from its JSON interchange form.
///
/// The JSON mirrors [`FlightLog`] field-for-field; columns are plain f64
/// arrays. Column lengths are checked against the timestamp column so that
/// downstream single-pass scans can zip them safely.
pub fn parse_flight_log_json_str(log_json: &str) -> Result<FlightLog> {
    validate_input_log(log_json)?;

    let log: FlightLog = serde_json::from_str(log_json)
        .context("Failed to deserialize flight log JSON using Serde")?;

    for dataset in &log.datasets {
        for (field, column) in &dataset.fields {
            if column.len() != dataset.timestamps.len() {
                anyhow::bail!(
                    "Dataset '{}' field '{}' has {} values for {} timestamps",
                    dataset.name,
                    field,
                    column.len(),
                    dataset.timestamps.len()
                );
            }
        }
    }

    Ok(log)
}

impl FlightLog {
    /// See [`parse_flight_log_json_str`].
    pub fn from_json_str(log_json: &str) -> Result<Self> {
        parse_flight_log_json_str(log_json)
    }
}
