//! Metric labels of the national case feed.

pub const CONFIRMED_CASES: &str = "Confirmed Cases";
pub const RECOVERED_CASES: &str = "Recovered Cases";
pub const REPORTED_DEATHS: &str = "Reported Deaths";
pub const SUSPECT_CASES: &str = "Suspect Cases";
pub const NON_CONFIRMED_CASES: &str = "Non-Confirmed Cases";
pub const ACTIVE_CASES: &str = "Active Cases";

/// Selector order of the dashboard.
pub const ALL: [&str; 6] = [
    CONFIRMED_CASES,
    RECOVERED_CASES,
    REPORTED_DEATHS,
    SUSPECT_CASES,
    NON_CONFIRMED_CASES,
    ACTIVE_CASES,
];
