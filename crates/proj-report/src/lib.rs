#![deny(warnings)]

//! Presentation adapters for projection results.
//!
//! Nothing here feeds back into the engine: these helpers only read
//! [`proj_core::CalculationResult`] and [`proj_core::MonthlySeries`] values
//! and turn them into display strings, chart datasets, and a printable report.

pub mod chart;
pub mod display;
pub mod format;
pub mod report;

use thiserror::Error;

pub use chart::{chart_data, tooltip_label, ChartData, ChartDataset};
pub use display::{bind_results, DisplaySlot};
pub use format::{format_axis_tick, format_compact_currency, format_currency};
pub use report::{export_report, render_report, ReportMeta};

/// Errors from exporting presentation output.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
