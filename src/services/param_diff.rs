//! Non-default parameter diffing.
//!
//! Compares the parameter set active at log start against up to two layered
//! default snapshots (system-level and airframe-level) plus static parameter
//! metadata, and reports every parameter whose value departs from the
//! applicable default. The engine favors over-reporting: parameters without
//! metadata are always listed, so configuration drift is never silently
//! hidden.

use crate::error::ReportError;
use crate::models::params::{DefaultSnapshot, ParameterMetadataMap, ParameterType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Equality tolerance for float-valued comparisons. Deliberately loose to
/// absorb float round-trip noise in logged parameter values.
const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Name prefixes excluded from diffing: per-vehicle RC setup and sensor
/// calibration, not meaningful configuration drift.
const RESERVED_PREFIXES: [&str; 2] = ["RC", "CAL_"];

/// One parameter whose active value differs from its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDiffEntry {
    pub name: String,
    /// Active value, rounded to the metadata display precision when given.
    pub value: f64,
    /// Airframe-level default shown as the comparison baseline; `None` when
    /// no default could be resolved (unknown parameter, no snapshots).
    pub default_value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
    /// `false` when the value also departs from the airframe-specific
    /// default; consumers use this purely for highlighting.
    pub is_airframe_default: bool,
}

/// Diff the active parameters against their defaults.
///
/// Output is sorted by parameter name ascending and stable across repeated
/// invocations on identical input. A resolution failure for a single
/// parameter is logged and skips only that parameter.
pub fn changed_parameters(
    active: &BTreeMap<String, f64>,
    metadata: &ParameterMetadataMap,
    system_defaults: Option<&DefaultSnapshot>,
    airframe_defaults: Option<&DefaultSnapshot>,
) -> Vec<ParameterDiffEntry> {
    let mut entries = Vec::new();

    // BTreeMap iteration gives the sorted-by-name output order.
    for (name, &value) in active {
        if RESERVED_PREFIXES.iter().any(|p| name.starts_with(p)) {
            continue;
        }

        match diff_one(name, value, metadata, system_defaults, airframe_defaults) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(err) => {
                log::warn!("skipping parameter '{}' in diff: {}", name, err);
            }
        }
    }

    entries
}

/// Resolve and compare one parameter. `Ok(None)` means "matches its default".
fn diff_one(
    name: &str,
    value: f64,
    metadata: &ParameterMetadataMap,
    system_defaults: Option<&DefaultSnapshot>,
    airframe_defaults: Option<&DefaultSnapshot>,
) -> Result<Option<ParameterDiffEntry>, ReportError> {
    let meta = metadata.get(name);

    // Layered default resolution: snapshot -> static metadata default ->
    // the active value itself (no known default, treated as matching).
    let resolve = |snapshot: Option<&DefaultSnapshot>| -> Option<f64> {
        match snapshot {
            Some(defaults) => Some(defaults.get(name).copied().unwrap_or(value)),
            None => meta.map(|m| m.default_value),
        }
    };
    let system_default = resolve(system_defaults);
    let airframe_default = resolve(airframe_defaults);

    let is_airframe_default =
        airframe_default.map_or(true, |d| (d - value).abs() < DEFAULT_TOLERANCE);

    let Some(meta) = meta else {
        // Unknown parameter: no way to tell whether it changed, so always
        // report it.
        return Ok(Some(ParameterDiffEntry {
            name: name.to_string(),
            value,
            default_value: airframe_default,
            min: None,
            max: None,
            description: "(unknown)".to_string(),
            is_airframe_default,
        }));
    };

    let system_default = system_default.unwrap_or(meta.default_value);
    let mut airframe_default = airframe_default.unwrap_or(meta.default_value);
    let mut display_value = value;

    let is_default = match meta.param_type {
        ParameterType::Float => {
            let is_default = (system_default - value).abs() < DEFAULT_TOLERANCE;
            if let Some(decimals) = meta.decimal_places {
                display_value = round_to(value, decimals);
                airframe_default = round_to(airframe_default, decimals);
            }
            is_default
        }
        ParameterType::Int => to_int(name, system_default)? == to_int(name, value)?,
    };

    if is_default {
        return Ok(None);
    }

    Ok(Some(ParameterDiffEntry {
        name: name.to_string(),
        value: display_value,
        default_value: Some(airframe_default),
        min: meta.min,
        max: meta.max,
        description: meta.short_desc.clone().unwrap_or_default(),
        is_airframe_default,
    }))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Integer view of a parameter value for exact INT comparisons.
fn to_int(name: &str, value: f64) -> Result<i64, ReportError> {
    if !value.is_finite() || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(ReportError::UnrepresentableValue {
            name: name.to_string(),
            value,
        });
    }
    Ok(value as i64)
}
