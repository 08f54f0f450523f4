//! Typed errors for report computation.

use thiserror::Error;

/// Errors raised while computing report results.
///
/// Absent datasets are represented as `Option::None` in the statistics
/// results, not as errors; these variants cover the genuinely exceptional
/// paths.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("dataset '{0}' not found in log")]
    MissingDataset(String),

    #[error("dataset '{dataset}' has no field '{field}'")]
    MissingField { dataset: String, field: String },

    #[error("parameter '{name}': value {value} is not representable as an integer")]
    UnrepresentableValue { name: String, value: f64 },
}
