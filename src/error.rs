//! Error handling module
//!
//! This module provides the crate-wide error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Run configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A finished case (or one of its sub-cases) failed
    #[error("Case '{name}' failed: {}", .failures.join(", "))]
    CaseFailed {
        name: String,
        failures: Vec<String>,
    },
}

impl Error {
    /// Full names of the failing leaf cases, empty for non-case errors
    pub fn failures(&self) -> &[String] {
        match self {
            Error::CaseFailed { failures, .. } => failures,
            Error::Config(_) => &[],
        }
    }
}
