//! Field-level certificate checks.
//!
//! No signature, chain or revocation checks are performed.

use cac_auth_sdk::{Certificate, ValidationResult};
use chrono::{DateTime, Utc};

/// Substring every accepted issuer name must contain.
pub const DOD_ISSUER_MARKER: &str = "DoD";

/// At least one of these key usages must be present.
pub const REQUIRED_KEY_USAGES: [&str; 2] = ["Digital Signature", "Key Encipherment"];

pub const ERR_NOT_YET_VALID: &str = "Certificate is not yet valid";
pub const ERR_EXPIRED: &str = "Certificate has expired";
pub const ERR_NOT_DOD_ISSUER: &str = "Certificate not issued by DoD PKI";
pub const ERR_MISSING_KEY_USAGE: &str = "Certificate missing required key usage";

/// Validate `cert` against the current time.
#[must_use]
pub fn validate_certificate(cert: &Certificate) -> ValidationResult {
    validate_certificate_at(cert, Utc::now())
}

/// Validate `cert` as of `now`.
///
/// Every check runs; errors are reported in check order.
#[must_use]
pub fn validate_certificate_at(cert: &Certificate, now: DateTime<Utc>) -> ValidationResult {
    let mut errors = Vec::new();

    if now < cert.valid_from {
        errors.push(ERR_NOT_YET_VALID.to_owned());
    }
    if now > cert.valid_to {
        errors.push(ERR_EXPIRED.to_owned());
    }
    if !cert.issuer.contains(DOD_ISSUER_MARKER) {
        errors.push(ERR_NOT_DOD_ISSUER.to_owned());
    }
    if !REQUIRED_KEY_USAGES
        .iter()
        .any(|usage| cert.key_usage.contains(*usage))
    {
        errors.push(ERR_MISSING_KEY_USAGE.to_owned());
    }

    ValidationResult::from_errors(errors)
}
