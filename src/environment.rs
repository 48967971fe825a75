use std::env;
use std::str::FromStr;

use crate::error::{Result, SiftError};

/// Retrieves and parses an environment variable.
///
/// # Returns
/// - `Ok(None)` if the variable is unset or blank
/// - `Err(SiftError::Config)` if it is set but does not parse
pub fn get_env_var_parsed<T: FromStr>(var: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| SiftError::Config(format!("{} has invalid value {:?}: {}", var, value, e))),
        _ => Ok(None),
    }
}

/// Retrieves an environment variable verbatim, without trimming.
pub fn get_env_var_raw(var: &str) -> Option<String> {
    env::var(var).ok()
}
