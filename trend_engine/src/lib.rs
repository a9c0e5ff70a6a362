//! Time-series derivation engine for daily epidemic metrics.
//!
//! Turns a table of contiguous daily series into derived views: daily or
//! weekly deltas with their period-over-period percent change, windowed to
//! the whole history or the last N days, plus cumulative views, lagged ratios
//! and per-capita figures.
//!
//! ```
//! use chrono::NaiveDate;
//! use trend_engine::{derive::derive, models::{cadence::Cadence, series::Series, window::Window}};
//!
//! let start = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
//! let s = Series::from_values(start, [10.0, 12.0, 15.0, 20.0]).unwrap();
//! let d = derive(&s, Cadence::Daily, Window::AllData).unwrap();
//! assert_eq!(d.values().collect::<Vec<_>>(), vec![2.0, 3.0, 5.0]);
//! assert_eq!(d.points()[1].pct_change, Some(50.0));
//! ```

pub mod config;
pub mod dashboard;
pub mod derive;
pub mod engine;
pub mod errors;
pub mod labels;
pub mod models;
pub mod snapshot;
pub mod status;
