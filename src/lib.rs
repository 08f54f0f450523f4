//! # Flight Review Report Engine
//!
//! Stateless computation layer behind flight log summary reports.
//!
//! Given an already-parsed flight log, this crate computes the numeric and
//! tabular results a report renderer consumes: per-flight-mode telemetry
//! aggregates, a non-default-parameter diff, estimated flight statistics,
//! a merged message timeline, and the ordered summary rows of the report
//! header. Log-format parsing, HTML/CSV/PDF rendering and the web server
//! are out of scope and live in the surrounding application.
//!
//! ## Architecture
//!
//! - [`api`]: consolidated DTO surface for the formatting layer
//! - [`models`]: flight log input model and shared domain types
//! - [`services`]: pure computation functions (mode statistics, parameter
//!   diff, flight statistics, messages, summary)
//! - [`error`]: typed errors for the narrow fallible paths
//!
//! Every computation accepts its inputs as explicit arguments and returns a
//! new result; there is no shared mutable state, so reports for independent
//! logs can be computed concurrently.

pub mod api;

pub mod error;

pub mod models;

pub mod services;
