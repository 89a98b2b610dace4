//! Recompute session: the single "last calculation" slot.
//!
//! Every input change triggers a synchronous [`Calculator::recompute`]. The new
//! result replaces the previous one before any dependent (chart, export) is
//! told about it.

use crate::engine::project;
use crate::series::project_12_months;
use proj_core::{CalculationResult, InputSnapshot, Locale, MonthlySeries, ProjectionConfig};
use tracing::trace;

/// A consumer notified after each recompute.
pub trait ProjectionSink {
    fn on_projection(&mut self, config: &ProjectionConfig, result: &CalculationResult);
}

/// Owns the configuration and the most recent projection.
#[derive(Clone, Debug)]
pub struct Calculator {
    config: ProjectionConfig,
    last: Option<CalculationResult>,
}

impl Calculator {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Most recent projection, if any.
    pub fn last(&self) -> Option<&CalculationResult> {
        self.last.as_ref()
    }

    /// Project `snapshot` and replace the retained result.
    pub fn recompute(&mut self, snapshot: &InputSnapshot) -> &CalculationResult {
        trace!("recompute");
        self.last.insert(project(snapshot, &self.config))
    }

    /// Recompute, then hand the published result to each sink in order.
    pub fn recompute_and_notify(
        &mut self,
        snapshot: &InputSnapshot,
        sinks: &mut [&mut dyn ProjectionSink],
    ) -> &CalculationResult {
        let result = self.last.insert(project(snapshot, &self.config));
        for sink in sinks.iter_mut() {
            sink.on_projection(&self.config, result);
        }
        result
    }

    /// Retained result, or a fresh projection of `snapshot` when none exists.
    pub fn last_or_recompute(&mut self, snapshot: &InputSnapshot) -> &CalculationResult {
        let config = &self.config;
        self.last.get_or_insert_with(|| project(snapshot, config))
    }

    /// Seasonal series of the retained result.
    pub fn series(&self, locale: Locale) -> Option<MonthlySeries> {
        self.last
            .as_ref()
            .map(|r| project_12_months(r, &self.config, locale))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
