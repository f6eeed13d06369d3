//! Typed environment variable lookups

use std::env::{self, VarError};

use crate::errors::EnvError;

/// Value of the environment variable `name`.
pub fn lookup(name: &str) -> Result<String, EnvError> {
    env::var(name).map_err(|e| match e {
        VarError::NotPresent => EnvError::NotPresent(name.to_string()),
        VarError::NotUnicode(_) => EnvError::NotUnicode(name.to_string()),
    })
}

/// Value of `name`, or `default` when it is not set.
pub fn lookup_or(name: &str, default: &str) -> Result<String, EnvError> {
    match lookup(name) {
        Err(EnvError::NotPresent(_)) => Ok(default.to_string()),
        other => other,
    }
}
