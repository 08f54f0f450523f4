//! Per-flight-mode telemetry aggregation.
//!
//! Segments a time-ordered series by the VTOL mode transition timeline and
//! reduces each segment to mean/max, tracked separately for multicopter and
//! fixed-wing flight.

use crate::models::mode::{FlightMode, ModeTransition};
use serde::{Deserialize, Serialize};

/// Aggregate of all samples observed under one flight mode.
///
/// `mean` is `None` and `max` is 0 when no samples were observed; this is a
/// no-data sentinel, not a zero measurement, and callers must keep the
/// distinction when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeAggregate {
    pub mean: Option<f64>,
    pub max: f64,
    pub count: usize,
}

impl ModeAggregate {
    fn add(&mut self, value: f64) {
        // mean is carried as a running sum until finish()
        self.mean = Some(self.mean.unwrap_or(0.0) + value);
        self.count += 1;
        if value > self.max {
            self.max = value;
        }
    }

    fn finish(&mut self) {
        if self.count > 0 {
            self.mean = self.mean.map(|sum| sum / self.count as f64);
        } else {
            self.mean = None;
        }
    }
}

/// Mean/max aggregates for the two tracked VTOL modes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerModeStats {
    pub multicopter: ModeAggregate,
    pub fixed_wing: ModeAggregate,
}

/// Reduce a time series to per-mode mean/max aggregates.
///
/// `timestamps` and `values` are parallel columns of the same dataset;
/// both they and `transitions` must be timestamp-ascending. The scan is a
/// single forward pass: the transition cursor never rewinds, so unsorted
/// input silently misattributes samples rather than erroring.
///
/// A transition takes effect at its own timestamp. Samples recorded before
/// the first transition, or under an untracked mode, are counted in neither
/// aggregate.
pub fn reduce_per_mode(
    timestamps: &[u64],
    values: &[f64],
    transitions: &[ModeTransition],
) -> PerModeStats {
    let mut stats = PerModeStats::default();
    let mut cursor = 0;
    let mut current_mode = FlightMode::Undefined;

    for (&t, &value) in timestamps.iter().zip(values.iter()) {
        while cursor < transitions.len() && t >= transitions[cursor].timestamp.micros() {
            current_mode = transitions[cursor].mode;
            cursor += 1;
        }
        match current_mode {
            FlightMode::Multicopter => stats.multicopter.add(value),
            FlightMode::FixedWing => stats.fixed_wing.add(value),
            _ => {}
        }
    }

    stats.multicopter.finish();
    stats.fixed_wing.finish();
    stats
}
