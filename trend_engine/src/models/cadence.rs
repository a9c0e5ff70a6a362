//! Differencing cadence: day-over-day or week-over-week.
//!
//! ```
//! use trend_engine::models::cadence::Cadence;
//!
//! let c: Cadence = "weekly".parse().unwrap();
//! assert_eq!(c.lag(), 7);
//! assert_eq!(c.to_string(), "Weekly");
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// How far back each difference reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// `value[i] - value[i-1]`
    Daily,
    /// `value[i] - value[i-7]`
    #[default]
    Weekly,
}

impl Cadence {
    /// Number of days between the two terms of a difference.
    pub const fn lag(&self) -> usize {
        match self {
            Cadence::Daily => 1,
            Cadence::Weekly => 7,
        }
    }

    /// Noun used in captions ("in the past week").
    pub const fn period_noun(&self) -> &'static str {
        match self {
            Cadence::Daily => "day",
            Cadence::Weekly => "week",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily => write!(f, "Daily"),
            Cadence::Weekly => write!(f, "Weekly"),
        }
    }
}

impl FromStr for Cadence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Cadence::Daily),
            "w" | "wk" | "week" | "weekly" => Ok(Cadence::Weekly),
            _ => Err(ParseError::Cadence(s.to_string())),
        }
    }
}
