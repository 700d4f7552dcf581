#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! CAC Auth Module
//!
//! Simulated Common Access Card authentication for demonstrations and
//! development environments. Nothing here talks to a card reader or checks
//! a signature:
//!
//! - authentication picks a random outcome from a weighted table after an
//!   artificial card read delay, and fabricates a fixed identity on success
//! - certificate validation compares the validity window, issuer and key
//!   usage fields only
//! - the middleware probe reports a random installation state
//!
//! Consumers use [`CacAuthLocalClient`] through the
//! [`cac_auth_sdk::CacAuthClient`] trait.
//!
//! ## Configuration
//!
//! ```yaml
//! auth_delay_min_ms: 1000
//! auth_delay_max_ms: 3000
//! middleware_delay_ms: 500
//! middleware_ready_probability: 0.9
//! middleware_version: "7.3.2"
//! outcome_weights:
//!   success: 0.80
//!   card_not_detected: 0.10
//!   invalid_pin: 0.05
//!   certificate_expired: 0.03
//!   certificate_revoked: 0.02
//! demo_identity:
//!   name: "John A. Smith"
//!   rank: "CPT"
//!   dod_id: "1234567890"
//!   unit: "U.S. Army Cyber Command"
//!   clearance_level: secret
//! ```

pub mod config;
pub mod domain;

pub use config::{CacAuthConfig, load_config};
pub use domain::{CacAuthLocalClient, MemoryAttemptSink, Service, TracingAttemptSink};
