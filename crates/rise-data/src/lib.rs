//! Data ingestion layer for the RISE attendance report.
//!
//! Responsible for discovering timesheet PDFs, extracting bundles, reading
//! page text, segmenting pages into day blocks, aggregating attendance
//! records and running the top-level batch analysis.

pub mod aggregator;
pub mod analysis;
pub mod bundle;
pub mod reader;
pub mod segmenter;

pub use rise_core as core;
