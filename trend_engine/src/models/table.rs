//! Labelled metrics sharing one date axis.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{errors::SeriesError, models::series::Series};

/// All metrics of one data load, keyed by label in insertion order.
///
/// Every series in the table covers exactly the same days.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MetricTable {
    metrics: IndexMap<String, Series>,
}

impl MetricTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a metric. Fails if its axis differs from the metrics
    /// already present.
    pub fn insert(&mut self, label: impl Into<String>, series: Series) -> Result<(), SeriesError> {
        let label = label.into();
        if let Some((_, existing)) = self.metrics.iter().find(|(k, _)| **k != label) {
            if !existing.shares_axis_with(&series) {
                return Err(SeriesError::AxisMismatch { label });
            }
        }
        self.metrics.insert(label, series);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, label: impl Into<String>, series: Series) -> Result<Self, SeriesError> {
        self.insert(label, series)?;
        Ok(self)
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.metrics.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Number of days on the shared axis (0 for an empty table).
    pub fn days(&self) -> usize {
        self.metrics.values().next().map_or(0, Series::len)
    }

    /// Last day on the shared axis.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.metrics.values().next().map(Series::last_date)
    }
}
