use std::path::PathBuf;

use clap::{Parser, Subcommand};
use trend_engine::models::{cadence::Cadence, request::Measure, window::Window};

use crate::sources::{CASES_URL, SAMPLES_URL};

#[derive(Parser, Debug)]
#[command(author, version, about = "Derive daily trend views from the national case feed")]
pub struct Cli {
    /// Path to an engine config TOML (falls back to $TREND_ENGINE_CONFIG, then built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Case feed location: an http(s) URL or a local CSV path
    #[arg(long, global = true, default_value = CASES_URL)]
    pub feed: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a derived series as JSON
    Derive {
        /// Metric label (e.g. "Confirmed Cases")
        #[arg(long, default_value = "Confirmed Cases")]
        metric: String,

        /// Differencing cadence: daily or weekly
        #[arg(long, default_value = "weekly")]
        cadence: Cadence,

        /// Window preset: all, or <n>d for the last n days
        #[arg(long, default_value = "all")]
        window: Window,

        /// Divide values by the cadence length (average per day)
        #[arg(long)]
        per_day: bool,

        /// Show raw cumulative levels instead of deltas
        #[arg(long, conflicts_with = "per_day")]
        cumulative: bool,

        /// Pair each delta with the same day's cumulative total
        #[arg(long, conflicts_with_all = ["per_day", "cumulative"])]
        trajectory: bool,
    },

    /// Print the status panel figures as JSON
    Status {
        /// Tested samples feed location
        #[arg(long, default_value = SAMPLES_URL)]
        samples: String,

        /// Population for per-million figures (falls back to $TREND_ENGINE_POPULATION, then config)
        #[arg(long)]
        population: Option<f64>,
    },

    /// List metric labels and the covered date range
    Metrics,
}

/// The view selected by the `derive` flags.
pub fn measure_from_flags(per_day: bool, cumulative: bool, trajectory: bool) -> Measure {
    if trajectory {
        Measure::Trajectory
    } else if cumulative {
        Measure::Cumulative
    } else if per_day {
        Measure::PerDayAverage
    } else {
        Measure::Delta
    }
}
