//! Engine configuration: parsing, normalization, and loading.
//!
//! The configuration is a TOML document that carries the per-metric
//! reporting-lag offset table plus a few status-panel constants:
//!
//! ```toml
//! cfr_lag_days = 7
//! population = 10200000.0
//!
//! [metrics."Reported Deaths"]
//! weekly = 8
//! cumulative = 16
//! ```
//!
//! Offsets count leading points dropped from an `AllData` view of that
//! metric, because the source feed reported them late or incompletely.
//! Metrics that are not listed have no offset.
//!
//! Key behaviors:
//! - Metric labels are trimmed; empty labels and labels that collide after
//!   trimming are rejected.
//! - `cfr_lag_days` must be at least 1 and `population` must be positive.
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_config_str`]
//! - Parse + normalize from a file path: [`load_config_path`]
//! - Resolve from `TREND_ENGINE_CONFIG` or fall back to defaults: [`load_config_from_env`]

use std::path::Path;

use anyhow::{Context, bail};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use shared_utils::env::{EnvError, get_env_var};
use tracing::{debug, info};

use crate::{
    labels::{ACTIVE_CASES, CONFIRMED_CASES, RECOVERED_CASES, REPORTED_DEATHS},
    models::cadence::Cadence,
};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "TREND_ENGINE_CONFIG";

/// Days between case confirmation and death used for the case-fatality rate.
pub const DEFAULT_CFR_LAG_DAYS: usize = 7;

/// Fallback population when none is configured.
pub const DEFAULT_POPULATION: f64 = 10.2e6;

/// Offsets shipped with the engine for the national case feed.
pub static DEFAULT_CONFIG: Lazy<EngineConfig> = Lazy::new(|| {
    let mut metrics = IndexMap::new();
    metrics.insert(
        CONFIRMED_CASES.to_string(),
        ReportingLag { cumulative: 1, ..Default::default() },
    );
    metrics.insert(
        REPORTED_DEATHS.to_string(),
        ReportingLag { weekly: 8, cumulative: 16, ..Default::default() },
    );
    metrics.insert(
        RECOVERED_CASES.to_string(),
        ReportingLag { weekly: 5, cumulative: 13, ..Default::default() },
    );
    metrics.insert(
        ACTIVE_CASES.to_string(),
        ReportingLag { cumulative: 1, ..Default::default() },
    );
    EngineConfig {
        cfr_lag_days: DEFAULT_CFR_LAG_DAYS,
        population: Some(DEFAULT_POPULATION),
        metrics,
    }
});

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Lag (days) of the case-fatality ratio.
    #[serde(default = "default_cfr_lag")]
    pub cfr_lag_days: usize,

    /// Population used for per-million figures when the caller supplies none.
    #[serde(default)]
    pub population: Option<f64>,

    /// Metric label -> reporting-lag offsets.
    #[serde(default)]
    pub metrics: IndexMap<String, ReportingLag>,
}

/// Leading points to drop from the `AllData` view of one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportingLag {
    /// Offset into the daily delta series.
    pub daily: usize,
    /// Offset into the weekly delta series.
    pub weekly: usize,
    /// Offset into the raw cumulative series.
    pub cumulative: usize,
}

/// Which derived view an offset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Delta(Cadence),
    Cumulative,
}

impl ReportingLag {
    pub fn for_view(&self, view: View) -> usize {
        match view {
            View::Delta(Cadence::Daily) => self.daily,
            View::Delta(Cadence::Weekly) => self.weekly,
            View::Cumulative => self.cumulative,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl EngineConfig {
    /// Offset for `label` in `view`; 0 for unlisted metrics.
    pub fn offset(&self, label: &str, view: View) -> usize {
        self.metrics
            .get(label)
            .map_or(0, |lag| lag.for_view(view))
    }
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default)]
pub struct NormalizationReport {
    /// Number of metric labels that changed when trimming.
    pub labels_trimmed: usize,
}

/// Normalize a config in place.
///
/// Errors:
/// - empty or duplicate metric labels after trimming
/// - `cfr_lag_days == 0`
/// - a non-positive or non-finite `population`
pub fn normalize_config(cfg: &mut EngineConfig) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    if cfg.cfr_lag_days == 0 {
        bail!("cfr_lag_days must be > 0");
    }
    if let Some(p) = cfg.population {
        if !p.is_finite() || p <= 0.0 {
            bail!("population must be a positive number, got {p}");
        }
    }

    let mut rebuilt: IndexMap<String, ReportingLag> = IndexMap::new();
    for (raw, lag) in std::mem::take(&mut cfg.metrics) {
        let label = raw.trim().to_string();
        if label.is_empty() {
            bail!("metric label cannot be empty after trimming");
        }
        if label != raw {
            report.labels_trimmed += 1;
        }
        if rebuilt.contains_key(&label) {
            bail!("duplicate metric label after normalization: {label}");
        }
        rebuilt.insert(label, lag);
    }
    cfg.metrics = rebuilt;

    Ok(report)
}

/// Parse and normalize a config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<EngineConfig> {
    let mut cfg: EngineConfig = toml::from_str(toml_str).context("failed to parse engine config TOML")?;
    let report = normalize_config(&mut cfg).context("normalize_config failed")?;
    debug!(labels_trimmed = report.labels_trimmed, "normalized engine config");
    Ok(cfg)
}

/// Read a config TOML file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read engine config {}", path.as_ref().display()))?;
    load_config_str(&text)
}

/// Load the file named by [`CONFIG_ENV_VAR`], or the built-in defaults when the
/// variable is unset. A set but unreadable variable is an error.
pub fn load_config_from_env() -> anyhow::Result<EngineConfig> {
    match get_env_var(CONFIG_ENV_VAR) {
        Ok(path) => {
            info!(%path, "loading engine config");
            load_config_path(path)
        }
        Err(EnvError::Missing(_)) => Ok(EngineConfig::default()),
        Err(e) => Err(e).context("resolve engine config path"),
    }
}

fn default_cfr_lag() -> usize {
    DEFAULT_CFR_LAG_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_known_lags() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.offset("Reported Deaths", View::Delta(Cadence::Weekly)), 8);
        assert_eq!(cfg.offset("Recovered Cases", View::Delta(Cadence::Weekly)), 5);
        assert_eq!(cfg.offset("Reported Deaths", View::Cumulative), 16);
        assert_eq!(cfg.offset("Confirmed Cases", View::Delta(Cadence::Daily)), 0);
        assert_eq!(cfg.offset("Suspect Cases", View::Cumulative), 0);
    }

    #[test]
    fn parses_and_trims() {
        let cfg = load_config_str(
            r#"
            cfr_lag_days = 10
            [metrics." Reported Deaths "]
            weekly = 3
        "#,
        )
        .unwrap();
        assert_eq!(cfg.cfr_lag_days, 10);
        assert_eq!(cfg.population, None);
        assert_eq!(cfg.offset("Reported Deaths", View::Delta(Cadence::Weekly)), 3);
        assert_eq!(cfg.offset("Reported Deaths", View::Cumulative), 0);
    }

    #[test]
    fn rejects_collisions_and_bad_values() {
        let err = load_config_str(
            r#"
            [metrics."A"]
            weekly = 1
            [metrics."A "]
            weekly = 2
        "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("duplicate metric label"));

        assert!(load_config_str("cfr_lag_days = 0").is_err());
        assert!(load_config_str("population = -5.0").is_err());
        assert!(load_config_str("unknown_key = 1").is_err());
        assert!(load_config_str("[metrics.A]\nmonthly = 2").is_err());
    }

    #[test]
    fn loads_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "population = 5000000.0").unwrap();
        let cfg = load_config_path(file.path()).unwrap();
        assert_eq!(cfg.population, Some(5e6));
        assert!(cfg.metrics.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn env_config_path_must_be_unicode() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        // SAFETY: the only test in this crate touching this variable.
        unsafe { std::env::set_var(CONFIG_ENV_VAR, OsStr::from_bytes(b"engine\xff.toml")) };
        let err = load_config_from_env().unwrap_err();
        assert!(format!("{err:#}").contains("not valid Unicode"));

        unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
        assert_eq!(load_config_from_env().unwrap(), EngineConfig::default());
    }

    #[test]
    fn default_offsets_follow_label_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.offset(CONFIRMED_CASES, View::Cumulative), 1);
        assert_eq!(cfg.offset(RECOVERED_CASES, View::Cumulative), 13);
        assert_eq!(cfg.offset(ACTIVE_CASES, View::Cumulative), 1);
        assert_eq!(cfg.offset(REPORTED_DEATHS, View::Delta(Cadence::Weekly)), 8);
    }

    #[test]
    fn snapshot_default_config() {
        insta::assert_json_snapshot!(&EngineConfig::default().metrics, @r#"
        {
          "Confirmed Cases": {
            "daily": 0,
            "weekly": 0,
            "cumulative": 1
          },
          "Reported Deaths": {
            "daily": 0,
            "weekly": 8,
            "cumulative": 16
          },
          "Recovered Cases": {
            "daily": 0,
            "weekly": 5,
            "cumulative": 13
          },
          "Active Cases": {
            "daily": 0,
            "weekly": 0,
            "cumulative": 1
          }
        }
        "#);
    }
}
