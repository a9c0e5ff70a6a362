use std::{env::VarError, str::FromStr};

use thiserror::Error;

/// Failure to read a setting from the process environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// The variable is set but is not valid Unicode.
    #[error("Environment variable {0} is not valid Unicode")]
    NotUnicode(String),

    /// The variable is set but its value does not parse.
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: String, value: String },
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, EnvError> {
    std::env::var(name).map_err(|e| match e {
        VarError::NotPresent => EnvError::Missing(name.to_string()),
        VarError::NotUnicode(_) => EnvError::NotUnicode(name.to_string()),
    })
}

/// Reads and parses an optional environment variable.
///
/// Returns `Ok(None)` when the variable is unset and an error when it is set
/// to something `T` cannot parse.
pub fn get_env_parsed<T: FromStr>(name: &str) -> Result<Option<T>, EnvError> {
    match get_env_var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| EnvError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
        Err(EnvError::Missing(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
