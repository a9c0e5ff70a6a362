//! Canonical in-memory representation of one daily metric.
//!
//! A [`Series`] is the unit every derivation consumes. It is built once per
//! data refresh by the loading side and never mutated afterwards.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::SeriesError;

/// A single daily observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day of the observation.
    pub date: NaiveDate,
    /// Reported value for that day (usually a cumulative count).
    pub value: f64,
}

/// An ordered, gap-free, one-point-per-day series.
///
/// Construction through [`Series::new`] guarantees the series is non-empty
/// and that consecutive dates are exactly one day apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<Observation>,
}

impl Series {
    /// Validate and wrap a list of observations.
    ///
    /// Errors:
    /// - [`SeriesError::Empty`] for no observations
    /// - [`SeriesError::NotIncreasing`] when a date repeats or goes backwards
    /// - [`SeriesError::Gap`] when a calendar day is missing
    pub fn new(points: Vec<Observation>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (i, pair) in points.windows(2).enumerate() {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current <= previous {
                return Err(SeriesError::NotIncreasing {
                    index: i + 1,
                    previous,
                    current,
                });
            }
            if current - previous != Duration::days(1) {
                return Err(SeriesError::Gap { previous, current });
            }
        }
        Ok(Self { points })
    }

    /// Build a series of consecutive days starting at `start`.
    pub fn from_values(start: NaiveDate, values: impl IntoIterator<Item = f64>) -> Result<Self, SeriesError> {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Observation {
                date: start + Duration::days(i as i64),
                value,
            })
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` if the series holds no observations; never the case after [`Series::new`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// The most recent observation.
    pub fn latest(&self) -> Observation {
        self.points[self.points.len() - 1]
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn dates(&self) -> impl ExactSizeIterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// True if `other` covers exactly the same days.
    pub fn shares_axis_with(&self, other: &Series) -> bool {
        self.len() == other.len() && self.first_date() == other.first_date()
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<Observation>::deserialize(deserializer)?;
        Series::new(points).map_err(serde::de::Error::custom)
    }
}
