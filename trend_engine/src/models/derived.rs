//! Output of a derivation: dated values with their period-over-period change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::cadence::Cadence;

/// One derived point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub date: NaiveDate,
    /// Absolute derived value (a delta, or a raw level for cumulative views).
    pub value: f64,
    /// Percent change against the previous derived value; `None` when there is
    /// no previous value or it was zero.
    pub pct_change: Option<f64>,
}

/// One point of the trajectory view: new values over the cadence period
/// against the cumulative total on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub date: NaiveDate,
    /// Cumulative level on `date`.
    pub total: f64,
    /// Increase over the cadence period ending on `date`.
    pub new: f64,
}

/// Ordered derived points. Dates are strictly increasing and the series is
/// never empty when returned from a successful derivation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedSeries {
    points: Vec<DerivedPoint>,
}

impl DerivedSeries {
    pub(crate) fn new(points: Vec<DerivedPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DerivedPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<DerivedPoint> {
        self.points
    }

    pub fn dates(&self) -> impl ExactSizeIterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn pct_changes(&self) -> impl ExactSizeIterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.pct_change)
    }

    /// Scale each value to a per-day average over the cadence period
    /// (weekly deltas divided by 7). Percent changes are ratios and stay as
    /// computed.
    pub fn per_day_average(mut self, cadence: Cadence) -> Self {
        let lag = cadence.lag() as f64;
        for p in &mut self.points {
            p.value /= lag;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_day_average_keeps_pct() {
        let d = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let s = DerivedSeries::new(vec![
            DerivedPoint { date: d, value: 70.0, pct_change: None },
            DerivedPoint { date: d.succ_opt().unwrap(), value: 140.0, pct_change: Some(100.0) },
        ]);
        let avg = s.per_day_average(Cadence::Weekly);
        assert_eq!(avg.values().collect::<Vec<_>>(), vec![10.0, 20.0]);
        assert_eq!(avg.pct_changes().collect::<Vec<_>>(), vec![None, Some(100.0)]);
    }
}
