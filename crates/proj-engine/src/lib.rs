#![deny(warnings)]

//! Projection engine for the venue partnership calculator.
//!
//! This crate provides:
//! - An input collector turning raw UI key/value pairs into an [`InputSnapshot`]
//! - The pure weekly/monthly/annual projection ([`project`])
//! - The seasonal 12-month series ([`project_12_months`])
//! - A recompute session holding the last calculation ([`Calculator`])

pub mod collector;
pub mod engine;
pub mod series;
pub mod session;

pub use collector::{collect, collect_with_defaults, InputSource};
pub use engine::project;
pub use series::{project_12_months, round_half_up};
pub use session::{Calculator, ProjectionSink};

pub use proj_core::{CalculationResult, InputSnapshot, MonthlySeries, ProjectionConfig};
