//! Headline figures for the status panel.
//!
//! The case-fatality rate divides the latest death count by the confirmed
//! case count `cfr_lag_days` earlier, approximating the delay between
//! confirmation and death. Recovery rate is its complement.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    derive::{PER_MILLION, lag_ratio, per_capita},
    errors::{DeriveError, DeriveResult},
    labels::{CONFIRMED_CASES, REPORTED_DEATHS},
    models::{series::Series, table::MetricTable},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// Last day of the loaded data.
    pub as_of: NaiveDate,
    /// Percent, two decimals. `None` when the lagged case count is zero.
    pub case_fatality_rate: Option<f64>,
    /// `100 - case_fatality_rate`.
    pub recovery_rate: Option<f64>,
    pub tested_samples: Option<f64>,
    pub cases_per_million: f64,
    pub deaths_per_million: f64,
    pub samples_per_million: Option<f64>,
}

impl StatusReport {
    /// Compute the panel from a loaded table.
    ///
    /// Errors:
    /// - [`DeriveError::UnknownMetric`] if confirmed cases or deaths are missing
    /// - [`DeriveError::InsufficientHistory`] if the table is shorter than the lag
    /// - [`DeriveError::InvalidPopulation`] for a non-positive population
    pub fn compute(
        table: &MetricTable,
        population: f64,
        tested_samples: Option<f64>,
        cfr_lag_days: usize,
    ) -> DeriveResult<Self> {
        let cases = metric(table, CONFIRMED_CASES)?;
        let deaths = metric(table, REPORTED_DEATHS)?;

        let cfr = lag_ratio(deaths, cases, cfr_lag_days)?.map(|r| round_to(r, 2));
        let samples_per_million = tested_samples
            .map(|s| per_capita(s, population, PER_MILLION).map(|v| v.round()))
            .transpose()?;

        Ok(Self {
            as_of: cases.last_date(),
            case_fatality_rate: cfr,
            recovery_rate: cfr.map(|r| round_to(100.0 - r, 2)),
            tested_samples,
            cases_per_million: cases.latest_per_capita(population, PER_MILLION)?.round(),
            deaths_per_million: deaths.latest_per_capita(population, PER_MILLION)?.round(),
            samples_per_million,
        })
    }
}

fn metric<'t>(table: &'t MetricTable, label: &str) -> DeriveResult<&'t Series> {
    table
        .get(label)
        .ok_or_else(|| DeriveError::UnknownMetric(label.to_string()))
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}
