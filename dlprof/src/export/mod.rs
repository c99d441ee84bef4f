//! Report output
//!
//! - `report`: ranked per-batch text report for stdout
//! - `json`: the same report as JSON for external tooling

pub mod json;
pub mod report;

pub use json::JsonReportExporter;
pub use report::{format_command, format_report_line, write_report};
