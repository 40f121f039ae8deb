//! Runtime layer for the RISE attendance report.
//!
//! Validates the batch inputs, prepares a session-scoped workspace for the
//! uploaded bundle, runs the analysis and writes the report artifacts.

pub mod artifacts;
pub mod batch;

pub use rise_core as core;
pub use rise_data as data;
