// src/error.rs

use thiserror::Error;

/// A configuration problem found before any demand is drawn.
///
/// Every variant names the field it came from so the caller can point the user
/// at the offending input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("'{field}' is required")]
    Missing { field: &'static str },

    #[error("'{field}' must be numeric, got '{value}'")]
    NotNumeric { field: &'static str, value: String },

    #[error("'{field}' is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("unknown demand distribution '{0}' (expected normal or poisson)")]
    UnknownDistribution(String),

    #[error("unknown replenishment policy '{0}' (expected s_Q or R_s_S)")]
    UnknownPolicy(String),

    #[error("could not decode configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Name of the input field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::Missing { field }
            | ConfigError::NotNumeric { field, .. }
            | ConfigError::Invalid { field, .. } => field,
            ConfigError::UnknownDistribution(_) => "distribution",
            ConfigError::UnknownPolicy(_) => "policy",
            ConfigError::Parse(_) => "config",
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by a simulation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("simulation failed: {0}")]
    Runtime(String),
}

impl SimError {
    pub fn is_config(&self) -> bool {
        matches!(self, SimError::Config(_))
    }
}

/// Errors from the CSV output collaborators.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
