//! Run configuration module
//!
//! Combines explicitly set values with environment values using a fixed
//! priority order.

use super::env_config::{ConfigError, EnvConfig};
use super::env_reader::{EnvReader, SystemEnvReader};

/// Settings for a manual benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    iterations: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: RunConfigBuilder::DEFAULT_ITERATIONS,
        }
    }
}

impl RunConfig {
    /// Start a builder
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    /// Configuration from the process environment with defaults for unset values
    pub fn from_env() -> Result<Self, ConfigError> {
        RunConfigBuilder::new().resolve()
    }

    /// Iteration count used by manual benchmarks
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

/// Builder for [`RunConfig`]
#[derive(Debug, Clone, Default)]
pub struct RunConfigBuilder {
    iterations: Option<u64>,
}

impl RunConfigBuilder {
    const DEFAULT_ITERATIONS: u64 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self { iterations: None }
    }

    /// Set the iteration count for manual benchmarks
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Build from explicit values and defaults only
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let iterations = self.iterations.unwrap_or(Self::DEFAULT_ITERATIONS);
        if iterations == 0 {
            return Err(ConfigError::InvalidValue {
                key: "iterations".to_owned(),
                value: iterations.to_string(),
                expected: "a positive integer".to_owned(),
            });
        }

        Ok(RunConfig { iterations })
    }

    /// Build with environment fallback
    ///
    /// Priority order:
    /// 1. Values set on the builder
    /// 2. `TESTORBENCH_ITERATIONS`
    /// 3. Defaults
    pub fn resolve(self) -> Result<RunConfig, ConfigError> {
        self.resolve_with_reader(&SystemEnvReader)
    }

    /// Build with environment fallback read through `reader`
    pub fn resolve_with_reader<R: EnvReader>(self, reader: &R) -> Result<RunConfig, ConfigError> {
        let iterations = match self.iterations {
            Some(iterations) => Some(iterations),
            None => EnvConfig::get_iterations_with_reader(reader)?,
        };

        Self { iterations }.build()
    }
}
