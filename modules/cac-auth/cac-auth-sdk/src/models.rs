//! Domain models for the CAC auth module.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Security clearance, ordered from least to most privileged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceLevel {
    #[default]
    Unclassified,
    /// For Official Use Only.
    Fouo,
    Confidential,
    Secret,
    TopSecret,
}

impl ClearanceLevel {
    /// Every level, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Unclassified,
        Self::Fouo,
        Self::Confidential,
        Self::Secret,
        Self::TopSecret,
    ];

    /// Parse an exact, case-sensitive label such as `"top_secret"`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "unclassified" => Some(Self::Unclassified),
            "fouo" => Some(Self::Fouo),
            "confidential" => Some(Self::Confidential),
            "secret" => Some(Self::Secret),
            "top_secret" => Some(Self::TopSecret),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unclassified => "unclassified",
            Self::Fouo => "fouo",
            Self::Confidential => "confidential",
            Self::Secret => "secret",
            Self::TopSecret => "top_secret",
        }
    }

    /// Position on the clearance scale (`unclassified` = 0 .. `top_secret` = 4).
    #[must_use]
    pub fn ordinal(self) -> i32 {
        match self {
            Self::Unclassified => 0,
            Self::Fouo => 1,
            Self::Confidential => 2,
            Self::Secret => 3,
            Self::TopSecret => 4,
        }
    }
}

impl fmt::Display for ClearanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an authenticated card holder.
///
/// Immutable once built. In this module it is only ever fabricated by the
/// simulator on a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    name: String,
    rank: String,
    dod_id: String,
    unit: String,
    clearance_level: ClearanceLevel,
}

impl UserRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        rank: impl Into<String>,
        dod_id: impl Into<String>,
        unit: impl Into<String>,
        clearance_level: ClearanceLevel,
    ) -> Self {
        Self {
            name: name.into(),
            rank: rank.into(),
            dod_id: dod_id.into(),
            unit: unit.into(),
            clearance_level,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// `DoD` ID number (EDIPI) printed on the card.
    #[must_use]
    pub fn dod_id(&self) -> &str {
        &self.dod_id
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn clearance_level(&self) -> ClearanceLevel {
        self.clearance_level
    }

    /// Returns `true` if this user may access material at `required`.
    #[must_use]
    pub fn has_clearance(&self, required: ClearanceLevel) -> bool {
        self.clearance_level >= required
    }
}

/// Outcome of an authentication attempt.
///
/// A successful result always carries a user and a session token and never
/// an error; a failed result carries only an error message. The
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_token: Option<String>,
}

impl AuthResult {
    #[must_use]
    pub fn success(user: UserRecord, session_token: impl Into<String>) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
            session_token: Some(session_token.into()),
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(error.into()),
            session_token: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

/// X.509 certificate fields read from a card.
///
/// Supplied by the caller; validation only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub subject: String,
    pub issuer: String,
    pub serial_number: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    /// Key usage names, e.g. `"Digital Signature"`.
    pub key_usage: BTreeSet<String>,
}

/// Result of certificate validation. Valid if and only if no check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    /// Build a result from the failed checks, in check order.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Smart-card middleware state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiddlewareState {
    Ready,
    Error,
    NotInstalled,
}

/// Result of a middleware installation probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlewareStatus {
    pub installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub status: MiddlewareState,
}

impl MiddlewareStatus {
    #[must_use]
    pub fn ready(version: impl Into<String>) -> Self {
        Self {
            installed: true,
            version: Some(version.into()),
            status: MiddlewareState::Ready,
        }
    }

    #[must_use]
    pub fn not_installed() -> Self {
        Self {
            installed: false,
            version: None,
            status: MiddlewareState::NotInstalled,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == MiddlewareState::Ready
    }
}

/// One entry in the security attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub success: bool,
    /// `DoD` ID of the authenticated user, or `"unknown"`.
    pub user: String,
    pub ip_address: String,
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
