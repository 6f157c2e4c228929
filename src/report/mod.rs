//! Reporting for recorded runs.
//!
//! This module provides:
//! - Human-readable attribute summaries for the terminal
//! - JSON run reports for CI pipelines

pub mod json;
pub mod summary;

// Re-export key types
pub use json::{RunReport, write_json_report};
pub use summary::{format_bytes, render_summary};
