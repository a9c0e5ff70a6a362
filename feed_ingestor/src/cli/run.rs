//! Command execution. Each command returns the JSON it prints so it can be
//! exercised without spawning the binary.

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use trend_engine::{
    engine::DerivationEngine,
    models::request::{DerivationRequest, Measure},
    status::StatusReport,
};

use crate::{
    cli::{
        commands::{Cli, Commands, measure_from_flags},
        params::{resolve_config, resolve_population},
    },
    load::{load_samples, load_table},
    sources::source_for,
};

#[derive(Debug, Serialize)]
struct DeriveOutput<P> {
    caption: String,
    request: DerivationRequest,
    measure: Measure,
    points: P,
}

#[derive(Debug, Serialize)]
struct MetricsOutput {
    labels: Vec<String>,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
    days: usize,
}

pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = resolve_config(cli.config.as_deref())?;
    let cases = source_for(&cli.feed)?;
    let table = load_table(cases.as_ref())
        .await
        .with_context(|| format!("load case feed {}", cli.feed))?;

    let json = match cli.command {
        Commands::Derive {
            metric,
            cadence,
            window,
            per_day,
            cumulative,
            trajectory,
        } => {
            let engine = DerivationEngine::new(config);
            let request = DerivationRequest::new(metric, cadence, window);
            let measure = measure_from_flags(per_day, cumulative, trajectory);
            let caption = request.caption(measure);
            match measure {
                Measure::Delta => {
                    let points = engine.derive_request(&table, &request)?;
                    to_json(caption, request, measure, points)?
                }
                Measure::PerDayAverage => {
                    let points = engine.derive_request(&table, &request)?.per_day_average(cadence);
                    to_json(caption, request, measure, points)?
                }
                Measure::Cumulative => {
                    let points = engine.cumulative_request(&table, &request.metric, window)?;
                    to_json(caption, request, measure, points)?
                }
                Measure::Trajectory => {
                    let points = engine.trajectory_request(&table, &request)?;
                    to_json(caption, request, measure, points)?
                }
            }
        }

        Commands::Status { samples, population } => {
            let population = resolve_population(population, &config)?;
            let samples_source = source_for(&samples)?;
            let tested = load_samples(samples_source.as_ref())
                .await
                .with_context(|| format!("load samples feed {samples}"))?;
            let report = StatusReport::compute(&table, population, tested, config.cfr_lag_days)?;
            serde_json::to_string_pretty(&report)?
        }

        Commands::Metrics => {
            let first = table.iter().next().map(|(_, s)| s.first_date());
            let out = MetricsOutput {
                labels: table.labels().map(str::to_string).collect(),
                first_date: first,
                last_date: table.last_date(),
                days: table.days(),
            };
            serde_json::to_string_pretty(&out)?
        }
    };
    Ok(json)
}

fn to_json<P: Serialize>(
    caption: String,
    request: DerivationRequest,
    measure: Measure,
    points: P,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DeriveOutput {
        caption,
        request,
        measure,
        points,
    })
}
