#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! CAC Auth SDK
//!
//! This crate provides the public API for the `cac_auth` module:
//!
//! - [`CacAuthClient`] - Public API trait for consumers
//! - [`AttemptSink`] - Destination for authentication attempt records
//! - [`AuthResult`], [`UserRecord`], [`Certificate`], [`ValidationResult`],
//!   [`MiddlewareStatus`], [`AttemptRecord`] - Models
//! - [`CacAuthError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use cac_auth_sdk::CacAuthClient;
//!
//! let result = cac.simulate_auth(None, Some("123456")).await;
//! cac.log_attempt(&result, "10.0.0.7", "Mozilla/5.0");
//! if let Some(user) = result.user() {
//!     let allowed = cac.has_clearance(user.clearance_level().as_str(), "secret");
//! }
//! ```
//!
//! Everything behind this API is simulated: outcomes are random, the
//! identity is fabricated, and certificate checks are field comparisons only.

pub mod api;
pub mod error;
pub mod models;
pub mod sink;

// Re-export main types at crate root
pub use api::CacAuthClient;
pub use error::CacAuthError;
pub use models::{
    AttemptRecord, AuthResult, Certificate, ClearanceLevel, MiddlewareState, MiddlewareStatus,
    UserRecord, ValidationResult,
};
pub use sink::AttemptSink;
