//! Environment reader module
//!
//! Low-level access to configuration values stored in environment
//! variables, behind a trait so tests can supply their own values.

use std::env::{self, VarError};

use super::ConfigError;

/// Trait for reading configuration values from the environment
pub trait EnvReader {
    /// Get a value by key, `None` when it is not set
    fn get_var(&self, key: &str) -> Result<Option<String>, ConfigError>;
}

/// Reader backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvReader;

impl EnvReader for SystemEnvReader {
    fn get_var(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                key: key.to_owned(),
            }),
        }
    }
}

/// Mock environment reader for testing
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockEnvReader {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the mock reader
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

#[cfg(test)]
impl EnvReader for MockEnvReader {
    fn get_var(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.vars.get(key).cloned())
    }
}
