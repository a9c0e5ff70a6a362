//! Request-level entry point: resolve a metric by label, look up its
//! reporting-lag offset, and run the matching derivation.

use tracing::debug;

use crate::{
    config::{EngineConfig, View},
    derive::{cumulative_window_with_offset, derive_with_offset, trajectory},
    errors::{DeriveError, DeriveResult},
    models::{
        derived::{DerivedSeries, TrajectoryPoint},
        request::DerivationRequest,
        series::Series,
        table::MetricTable,
        window::Window,
    },
};

/// Stateless derivation engine parameterized by an offset table.
///
/// The engine never holds data; every call takes the table it works on.
#[derive(Debug, Clone, Default)]
pub struct DerivationEngine {
    config: EngineConfig,
}

impl DerivationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Difference the requested metric and window it.
    ///
    /// Errors:
    /// - [`DeriveError::UnknownMetric`] if the label is not in `table`
    /// - anything [`derive_with_offset`] returns
    pub fn derive_request(&self, table: &MetricTable, req: &DerivationRequest) -> DeriveResult<DerivedSeries> {
        let series = lookup(table, &req.metric)?;
        let offset = self.config.offset(&req.metric, View::Delta(req.cadence));
        debug!(metric = %req.metric, cadence = %req.cadence, window = %req.window, offset, "derive request");
        derive_with_offset(series, req.cadence, req.window, offset)
    }

    /// Raw levels of `metric` sliced to `window`, honoring the metric's
    /// cumulative offset.
    pub fn cumulative_request(&self, table: &MetricTable, metric: &str, window: Window) -> DeriveResult<DerivedSeries> {
        let series = lookup(table, metric)?;
        let offset = self.config.offset(metric, View::Cumulative);
        cumulative_window_with_offset(series, window, offset)
    }

    /// Trajectory view of the requested metric. Reporting-lag offsets do not
    /// apply to this view.
    pub fn trajectory_request(&self, table: &MetricTable, req: &DerivationRequest) -> DeriveResult<Vec<TrajectoryPoint>> {
        let series = lookup(table, &req.metric)?;
        trajectory(series, req.cadence, req.window)
    }
}

fn lookup<'t>(table: &'t MetricTable, metric: &str) -> DeriveResult<&'t Series> {
    table
        .get(metric)
        .ok_or_else(|| DeriveError::UnknownMetric(metric.to_string()))
}
