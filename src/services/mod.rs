//! Report computation services.
//!
//! Pure, synchronous functions that turn a materialized flight log into the
//! numeric and tabular results the report formatting layer consumes. Every
//! function returns its result directly; nothing is accumulated in shared
//! state, so independent reports can be computed concurrently.

pub mod flight_stats;

pub mod messages;

pub mod mode_stats;

pub mod param_diff;

pub mod summary;

pub use flight_stats::compute_flight_stats;
pub use messages::merged_message_timeline;
pub use mode_stats::reduce_per_mode;
pub use param_diff::changed_parameters;
pub use summary::build_report_summary;
