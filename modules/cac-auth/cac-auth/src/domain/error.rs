//! Domain errors for the CAC auth simulator.

use cac_auth_sdk::CacAuthError;

/// Internal domain errors.
///
/// Only raised while building the service from configuration; simulated
/// operations report failures as data.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("auth delay range is inverted: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("'{name}' must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: String, value: f64 },

    #[error("invalid outcome table: {reason}")]
    InvalidOutcomeTable { reason: String },

    #[error("invalid demo identity: {reason}")]
    InvalidIdentity { reason: String },
}

impl DomainError {
    pub fn invalid_probability(name: impl Into<String>, value: f64) -> Self {
        Self::InvalidProbability {
            name: name.into(),
            value,
        }
    }

    pub fn invalid_outcome_table(reason: impl Into<String>) -> Self {
        Self::InvalidOutcomeTable {
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for CacAuthError {
    fn from(e: DomainError) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}
