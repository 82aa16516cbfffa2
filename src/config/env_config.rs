//! Environment configuration module
//!
//! Typed access to the `TESTORBENCH_*` variables with validation.

use super::env_reader::{EnvReader, SystemEnvReader};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value could not be parsed or is out of range
    #[error("Invalid configuration value: {key}='{value}' (expected: {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
    /// An environment variable holds bytes that are not UTF-8
    #[error("Environment variable {key} is not valid Unicode")]
    NotUnicode { key: String },
}

/// Iteration count for manual benchmarks
pub const ITERATIONS_KEY: &str = "TESTORBENCH_ITERATIONS";

/// Environment configuration operations
pub struct EnvConfig;

impl EnvConfig {
    /// Get the benchmark iteration count
    pub fn get_iterations() -> Result<Option<u64>, ConfigError> {
        Self::get_iterations_with_reader(&SystemEnvReader)
    }

    /// Get the benchmark iteration count with a custom reader
    pub fn get_iterations_with_reader<R: EnvReader>(
        reader: &R,
    ) -> Result<Option<u64>, ConfigError> {
        reader
            .get_var(ITERATIONS_KEY)?
            .map(|value| Self::parse_iterations(&value, ITERATIONS_KEY))
            .transpose()
    }

    /// Parse a positive iteration count
    fn parse_iterations(value: &str, key: &str) -> Result<u64, ConfigError> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_owned(),
                value: value.to_owned(),
                expected: "a positive integer".to_owned(),
            })
    }
}
