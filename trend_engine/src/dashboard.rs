//! Synchronous update dispatch for a dashboard view.
//!
//! A control change (metric, cadence or window selector) produces a new
//! [`DerivationRequest`], which is derived immediately against the current
//! snapshot and pushed to a [`RenderSink`]. Nothing is scheduled or cached.

use std::sync::Arc;

use tracing::warn;

use crate::{
    engine::DerivationEngine,
    errors::{DeriveError, DeriveResult},
    models::{cadence::Cadence, derived::DerivedSeries, request::DerivationRequest, window::Window},
    snapshot::SnapshotStore,
};

/// Receives the outcome of every update.
pub trait RenderSink {
    /// A derivation succeeded.
    fn render(&mut self, request: &DerivationRequest, series: &DerivedSeries);

    /// The request could not be served; show a "not enough data" state.
    fn unavailable(&mut self, request: &DerivationRequest, error: &DeriveError);
}

pub struct Dashboard<S: RenderSink> {
    store: Arc<SnapshotStore>,
    engine: DerivationEngine,
    request: DerivationRequest,
    sink: S,
}

impl<S: RenderSink> Dashboard<S> {
    pub fn new(store: Arc<SnapshotStore>, engine: DerivationEngine, request: DerivationRequest, sink: S) -> Self {
        Self {
            store,
            engine,
            request,
            sink,
        }
    }

    pub fn request(&self) -> &DerivationRequest {
        &self.request
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn set_metric(&mut self, metric: impl Into<String>) -> DeriveResult<DerivedSeries> {
        self.request.metric = metric.into();
        self.refresh()
    }

    pub fn set_cadence(&mut self, cadence: Cadence) -> DeriveResult<DerivedSeries> {
        self.request.cadence = cadence;
        self.refresh()
    }

    /// Invalid windows are rejected before the current request changes.
    pub fn set_window(&mut self, window: Window) -> DeriveResult<DerivedSeries> {
        window.validate()?;
        self.request.window = window;
        self.refresh()
    }

    /// Re-derive the current request against the latest snapshot, e.g. after
    /// a data refresh.
    pub fn refresh(&mut self) -> DeriveResult<DerivedSeries> {
        let table = self.store.load();
        match self.engine.derive_request(&table, &self.request) {
            Ok(series) => {
                self.sink.render(&self.request, &series);
                Ok(series)
            }
            Err(e) => {
                warn!(metric = %self.request.metric, error = %e, "derivation unavailable");
                self.sink.unavailable(&self.request, &e);
                Err(e)
            }
        }
    }
}
