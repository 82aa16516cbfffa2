//! Configuration module for testorbench
//!
//! Run settings come from three layers:
//!
//! - [`env_reader`] - raw access to environment variables behind a trait
//! - [`env_config`] - typed, validated `TESTORBENCH_*` values
//! - [`run_config`] - the [`RunConfig`] handed to contexts, built with a priority order
//!
//! # Priority Logic
//!
//! 1. Values set on [`RunConfigBuilder`] (highest priority)
//! 2. Environment variables
//! 3. Defaults
//!
//! Invalid values are errors; defaults only apply when a value is unset.
//!
//! # Usage
//!
//! ```rust
//! use testorbench::config::RunConfig;
//!
//! let config = RunConfig::builder().with_iterations(100).build()?;
//!
//! assert_eq!(config.iterations(), 100);
//! # Ok::<(), testorbench::ConfigError>(())
//! ```
//!
//! # Environment
//!
//! | Variable                 | Meaning                                    |
//! |--------------------------|--------------------------------------------|
//! | `TESTORBENCH_ITERATIONS` | iteration count for manual benchmarks      |
//!
//! Only [`crate::Bench::execute_from_env`] reads the environment. Test
//! contexts always run once and criterion picks its own sample sizes.

pub mod env_config;
pub mod env_reader;
pub mod run_config;

pub use env_config::{ConfigError, EnvConfig};
pub use env_reader::{EnvReader, SystemEnvReader};
pub use run_config::{RunConfig, RunConfigBuilder};

#[cfg(test)]
pub use env_reader::MockEnvReader;
