//! Fetch + parse glue between feed sources and the engine's snapshot store.

use tracing::info;
use trend_engine::{models::table::MetricTable, snapshot::SnapshotStore};

use crate::{
    errors::IngestResult,
    io::{parse_case_feed, parse_samples_feed},
    sources::FeedSource,
};

/// Fetch and parse the case feed into a fresh table.
pub async fn load_table(source: &dyn FeedSource) -> IngestResult<MetricTable> {
    let body = source.fetch().await?;
    let table = parse_case_feed(&body)?;
    info!(
        source = %source.describe(),
        days = table.days(),
        last_date = ?table.last_date(),
        "loaded case feed"
    );
    Ok(table)
}

/// Fetch the samples feed and return its latest value.
pub async fn load_samples(source: &dyn FeedSource) -> IngestResult<Option<f64>> {
    let body = source.fetch().await?;
    parse_samples_feed(&body)
}

/// Load a complete new table and swap it into `store`. On error the store
/// keeps its current table.
pub async fn refresh(store: &SnapshotStore, source: &dyn FeedSource) -> IngestResult<()> {
    let table = load_table(source).await?;
    store.replace(table);
    Ok(())
}
