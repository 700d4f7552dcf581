//! Error types for the CAC auth module.

use thiserror::Error;

/// Errors that can occur when constructing or wiring the CAC auth service.
///
/// Simulated operations never fail with these: authentication failures are
/// reported as data in [`crate::AuthResult`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CacAuthError {
    /// The supplied configuration is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
