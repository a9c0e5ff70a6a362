//! Window presets applied after differencing.
//!
//! Display/parse accept both the dashboard labels (`"All Data"`,
//! `"Last 30 days"`) and a short CLI form (`"all"`, `"30d"`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{DeriveError, ParseError};

/// Which suffix of a derived series to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// Everything after the metric's reporting-lag offset.
    #[default]
    AllData,
    /// The final `n` points.
    LastNDays(usize),
}

impl Window {
    /// Presets offered by the dashboard selector.
    pub const PRESETS: [Window; 4] = [
        Window::AllData,
        Window::LastNDays(30),
        Window::LastNDays(15),
        Window::LastNDays(7),
    ];

    /// Reject malformed windows before any work is done.
    pub fn validate(&self) -> Result<(), DeriveError> {
        match *self {
            Window::LastNDays(0) => Err(DeriveError::InvalidWindow { days: 0 }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::AllData => write!(f, "All Data"),
            Window::LastNDays(n) => write!(f, "Last {n} days"),
        }
    }
}

impl FromStr for Window {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase();
        if matches!(norm.as_str(), "all" | "all data" | "all_data") {
            return Ok(Window::AllData);
        }

        let digits = norm
            .strip_prefix("last ")
            .and_then(|rest| rest.strip_suffix(" days").or_else(|| rest.strip_suffix(" day")))
            .or_else(|| norm.strip_suffix('d'))
            .ok_or_else(|| ParseError::Window(s.to_string()))?;

        digits
            .trim()
            .parse::<usize>()
            .map(Window::LastNDays)
            .map_err(|_| ParseError::Window(s.to_string()))
    }
}
