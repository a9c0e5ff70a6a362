use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by the derivation operations.
///
/// Percent-change divisions by zero are not errors; they surface as `None`
/// in the derived output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeriveError {
    /// The requested cadence, window, offset or lag needs more points than the series has.
    #[error("insufficient history: {required} points required, {available} available")]
    InsufficientHistory { required: usize, available: usize },

    /// A `LastNDays` window with a non-positive day count.
    #[error("invalid window: last {days} days")]
    InvalidWindow { days: usize },

    /// The request names a metric that is not in the loaded table.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Per-capita scaling needs a finite, strictly positive population.
    #[error("invalid population: {0}")]
    InvalidPopulation(f64),
}

/// Violations of the contiguous daily series invariant, raised at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("dates not strictly increasing at index {index}: {previous} then {current}")]
    NotIncreasing {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("missing day(s) between {previous} and {current}")]
    Gap {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("metric {label:?} does not share the table's date axis")]
    AxisMismatch { label: String },
}

/// Errors from parsing cadence and window names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown cadence: {0}")]
    Cadence(String),

    #[error("unknown window preset: {0}")]
    Window(String),
}

pub type DeriveResult<T> = Result<T, DeriveError>;
