use std::path::Path;

use anyhow::Context;
use shared_utils::env::get_env_parsed;
use trend_engine::config::{DEFAULT_POPULATION, EngineConfig, load_config_from_env, load_config_path};

/// Environment override for the population used in per-million figures.
pub const POPULATION_ENV_VAR: &str = "TREND_ENGINE_POPULATION";

/// `--config` wins over `$TREND_ENGINE_CONFIG`, which wins over the defaults.
pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => load_config_path(p),
        None => load_config_from_env(),
    }
}

/// `--population`, then `$TREND_ENGINE_POPULATION`, then the config, then
/// [`DEFAULT_POPULATION`].
pub fn resolve_population(flag: Option<f64>, config: &EngineConfig) -> anyhow::Result<f64> {
    if let Some(p) = flag {
        return Ok(p);
    }
    let from_env = get_env_parsed::<f64>(POPULATION_ENV_VAR).context("population override")?;
    Ok(from_env.or(config.population).unwrap_or(DEFAULT_POPULATION))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn population_precedence() {
        let mut cfg = EngineConfig::default();
        cfg.population = Some(3e6);

        // SAFETY: serialized with every other test touching this variable.
        unsafe { std::env::remove_var(POPULATION_ENV_VAR) };
        assert_eq!(resolve_population(Some(1e6), &cfg).unwrap(), 1e6);
        assert_eq!(resolve_population(None, &cfg).unwrap(), 3e6);

        cfg.population = None;
        assert_eq!(resolve_population(None, &cfg).unwrap(), DEFAULT_POPULATION);

        unsafe { std::env::set_var(POPULATION_ENV_VAR, "2000000") };
        assert_eq!(resolve_population(None, &cfg).unwrap(), 2e6);

        unsafe { std::env::set_var(POPULATION_ENV_VAR, "lots") };
        assert!(resolve_population(None, &cfg).is_err());

        unsafe { std::env::remove_var(POPULATION_ENV_VAR) };
    }
}
