//! Pure derivations over a daily [`Series`].
//!
//! Every function here is a stateless transformation: the same inputs always
//! produce the same output and nothing is cached between calls.
//!
//! Pipeline for [`derive`]:
//! 1. delta pass: `delta[j] = value[j + lag] - value[j]`, dated by the later day
//! 2. percent-change pass over the *whole* delta array:
//!    `pct[j] = delta[j] / delta[j-1] * 100 - 100`, `None` if `delta[j-1] == 0`
//! 3. windowing: `AllData` drops the leading reporting-lag offset,
//!    `LastNDays(n)` keeps the final `n` points
//!
//! Because the percent-change pass runs before windowing, a `LastNDays`
//! window keeps the percent change its first point had in the full series.
//!
//! [`trajectory`] shares the delta pass and windowing but pairs each delta
//! with the day's total instead of a percent change.

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    errors::{DeriveError, DeriveResult},
    models::{
        cadence::Cadence,
        derived::{DerivedPoint, DerivedSeries, TrajectoryPoint},
        series::{Observation, Series},
        window::Window,
    },
};

/// Scale used for "per 1M people" figures.
pub const PER_MILLION: f64 = 1e6;

/// Difference `series` at `cadence` and slice the result to `window`, with no
/// reporting-lag offset.
pub fn derive(series: &Series, cadence: Cadence, window: Window) -> DeriveResult<DerivedSeries> {
    derive_with_offset(series, cadence, window, 0)
}

/// [`derive`] with an explicit number of leading derived points to drop for
/// [`Window::AllData`]. The offset is ignored for `LastNDays`.
pub fn derive_with_offset(
    series: &Series,
    cadence: Cadence,
    window: Window,
    offset: usize,
) -> DeriveResult<DerivedSeries> {
    window.validate()?;

    let lag = cadence.lag();
    let deltas: Vec<(NaiveDate, f64)> = lagged_windows(series, lag)?
        .map(|w| (w[lag].date, w[lag].value - w[0].value))
        .collect();

    let derived = with_pct_change(deltas);
    debug!(%cadence, %window, offset, len = derived.len(), "derived series");
    apply_window(derived, window, offset).map(DerivedSeries::new)
}

/// Pair each `cadence` delta with the cumulative total of the same day.
///
/// No reporting-lag offset is applied; `LastNDays(n)` keeps the final `n`
/// points.
///
/// Errors are those of [`derive`].
pub fn trajectory(series: &Series, cadence: Cadence, window: Window) -> DeriveResult<Vec<TrajectoryPoint>> {
    window.validate()?;

    let lag = cadence.lag();
    let points: Vec<TrajectoryPoint> = lagged_windows(series, lag)?
        .map(|w| TrajectoryPoint {
            date: w[lag].date,
            total: w[lag].value,
            new: w[lag].value - w[0].value,
        })
        .collect();
    debug!(%cadence, %window, len = points.len(), "trajectory");
    apply_window(points, window, 0)
}

/// Slice the raw (non-differenced) series to `window`. Percent change is
/// computed between consecutive raw levels with the same zero rule.
pub fn cumulative_window(series: &Series, window: Window) -> DeriveResult<DerivedSeries> {
    cumulative_window_with_offset(series, window, 0)
}

/// [`cumulative_window`] with a leading offset applied to [`Window::AllData`].
pub fn cumulative_window_with_offset(
    series: &Series,
    window: Window,
    offset: usize,
) -> DeriveResult<DerivedSeries> {
    window.validate()?;
    let levels = series.points().iter().map(|p| (p.date, p.value)).collect();
    apply_window(with_pct_change(levels), window, offset).map(DerivedSeries::new)
}

/// `numerator[last] / denominator[last - lag] * 100`.
///
/// Used for case-fatality style rates where the lagging metric is compared
/// with the leading metric `lag` days earlier. Returns `Ok(None)` when that
/// denominator value is zero.
///
/// Errors:
/// - [`DeriveError::InsufficientHistory`] if `lag >= denominator.len()`
pub fn lag_ratio(numerator: &Series, denominator: &Series, lag: usize) -> DeriveResult<Option<f64>> {
    let den = denominator.points();
    if lag >= den.len() {
        return Err(DeriveError::InsufficientHistory {
            required: lag + 1,
            available: den.len(),
        });
    }
    let d = den[den.len() - 1 - lag].value;
    if d == 0.0 {
        return Ok(None);
    }
    Ok(Some(numerator.latest().value / d * 100.0))
}

/// `value / population * scale`, e.g. cases per million people.
///
/// Errors:
/// - [`DeriveError::InvalidPopulation`] for a zero, negative or non-finite population
pub fn per_capita(value: f64, population: f64, scale: f64) -> DeriveResult<f64> {
    if !population.is_finite() || population <= 0.0 {
        return Err(DeriveError::InvalidPopulation(population));
    }
    Ok(value / population * scale)
}

impl Series {
    /// Latest value of this series per `scale` people.
    pub fn latest_per_capita(&self, population: f64, scale: f64) -> DeriveResult<f64> {
        per_capita(self.latest().value, population, scale)
    }
}

/// Windows of `lag + 1` consecutive observations, one per delta.
fn lagged_windows(series: &Series, lag: usize) -> DeriveResult<std::slice::Windows<'_, Observation>> {
    let points = series.points();
    if points.len() <= lag {
        return Err(DeriveError::InsufficientHistory {
            required: lag + 1,
            available: points.len(),
        });
    }
    Ok(points.windows(lag + 1))
}

fn with_pct_change(values: Vec<(NaiveDate, f64)>) -> Vec<DerivedPoint> {
    let mut out = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for (date, value) in values {
        let pct_change = match previous {
            Some(prev) if prev != 0.0 => Some(value / prev * 100.0 - 100.0),
            _ => None,
        };
        out.push(DerivedPoint {
            date,
            value,
            pct_change,
        });
        previous = Some(value);
    }
    out
}

fn apply_window<T>(mut points: Vec<T>, window: Window, offset: usize) -> DeriveResult<Vec<T>> {
    let available = points.len();
    let start = match window {
        Window::AllData => {
            if offset >= available {
                return Err(DeriveError::InsufficientHistory {
                    required: offset + 1,
                    available,
                });
            }
            offset
        }
        Window::LastNDays(n) => {
            if n > available {
                return Err(DeriveError::InsufficientHistory {
                    required: n,
                    available,
                });
            }
            available - n
        }
    };
    points.drain(..start);
    Ok(points)
}
