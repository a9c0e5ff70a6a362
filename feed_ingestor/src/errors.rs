use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;
use trend_engine::errors::SeriesError;

/// The unified error type for the `feed_ingestor` crate.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading a local feed file failed.
    #[error("Failed to read feed {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error during an HTTP request (e.g., network failure, timeout).
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The feed host answered with a non-success status.
    #[error("Feed {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A date cell did not parse.
    #[error("Line {line}: invalid date {value:?}")]
    Date { line: usize, value: String },

    /// A numeric cell did not parse.
    #[error("Line {line}: invalid value {value:?} in column {column}")]
    Value {
        line: usize,
        column: String,
        value: String,
    },

    /// Two consecutive feed dates are too far apart to forward-fill.
    #[error("Gap of {missing} days between {previous} and {current} exceeds the fill limit of {limit}")]
    GapTooLong {
        previous: NaiveDate,
        current: NaiveDate,
        missing: i64,
        limit: usize,
    },

    /// No usable rows remained after skipping.
    #[error("Feed contains no data rows")]
    Empty,

    /// The parsed rows did not form a valid series.
    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),
}

pub type IngestResult<T> = Result<T, IngestError>;
