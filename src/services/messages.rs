//! Merged message timeline.
//!
//! Combines logged text messages with structured events into one
//! timestamp-sorted list of displayable rows.

use crate::models::log::FlightLog;
use crate::models::time::LogTimestamp;
use serde::{Deserialize, Serialize};

/// One row of the message table: elapsed time, severity label, text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    pub time: String,
    pub level: String,
    pub message: String,
}

/// Merge logged messages and events, sorted by timestamp.
///
/// A string message ending in a tab is a backwards-compatibility duplicate
/// of an event with the same text and is dropped.
pub fn merged_message_timeline(log: &FlightLog) -> Vec<MessageRow> {
    let mut merged: Vec<(u64, &str, &str)> = log
        .logged_events
        .iter()
        .map(|e| (e.timestamp, e.level.as_str(), e.message.as_str()))
        .collect();

    for message in &log.logged_messages {
        if message.message.ends_with('\t') {
            continue;
        }
        merged.push((
            message.timestamp,
            message.level.as_str(),
            message.message.as_str(),
        ));
    }

    merged.sort_by_key(|&(timestamp, _, _)| timestamp);

    merged
        .into_iter()
        .map(|(timestamp, level, message)| MessageRow {
            time: LogTimestamp::new(timestamp).elapsed_str(),
            level: level.to_string(),
            message: message.to_string(),
        })
        .collect()
}
