use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage type of a vehicle parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Float,
    Int,
}

/// Static reference metadata for a built-in parameter.
///
/// Sourced from the firmware's parameter definitions; read-only during report
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterMetadata {
    pub param_type: ParameterType,
    pub default_value: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Display precision for FLOAT parameters.
    #[serde(default)]
    pub decimal_places: Option<u32>,
    #[serde(default)]
    pub short_desc: Option<String>,
}

/// Parameter metadata keyed by name.
pub type ParameterMetadataMap = HashMap<String, ParameterMetadata>;

/// A full parameter snapshot used as a comparison baseline (system-level or
/// airframe-level defaults). Never mutated.
pub type DefaultSnapshot = HashMap<String, f64>;
