//! Core types and text-matching primitives for the RISE attendance report.
//!
//! Holds the shared error type, the attendance data model, the line matchers
//! used by the block segmenter, the month/year resolver and CLI settings.

pub mod error;
pub mod formatting;
pub mod matchers;
pub mod models;
pub mod period;
pub mod settings;
