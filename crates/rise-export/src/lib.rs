//! Report artifacts for the RISE attendance report.
//!
//! Turns an [`rise_data::analysis::AnalysisResult`] into the sorted detail and
//! summary views, a paginated text report, CSV tables, an XLSX workbook, a
//! JSON dump and a ZIP of the source documents for months that contain the
//! marker.

pub mod document;
pub mod dump;
pub mod months;
pub mod spreadsheet;
pub mod views;
pub mod workbook;
