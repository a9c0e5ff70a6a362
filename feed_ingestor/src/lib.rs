//! Loading side of the trend dashboards: fetches the national case feeds,
//! parses them into a [`MetricTable`](trend_engine::models::table::MetricTable)
//! and hands them to the engine.

#[cfg(feature = "cli")]
pub mod cli;
pub mod errors;
pub mod io;
pub mod load;
pub mod sources;
