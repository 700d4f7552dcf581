//! Configuration for the CAC auth simulator.

use std::path::Path;

use cac_auth_sdk::{ClearanceLevel, UserRecord};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Environment variable prefix. Nested keys are separated by `__`,
/// e.g. `CAC_AUTH__OUTCOME_WEIGHTS__SUCCESS=0.5`.
pub const ENV_PREFIX: &str = "CAC_AUTH__";

/// Simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacAuthConfig {
    /// Lower bound (inclusive) of the simulated card read delay.
    pub auth_delay_min_ms: u64,

    /// Upper bound (exclusive) of the simulated card read delay.
    pub auth_delay_max_ms: u64,

    /// Fixed delay of the middleware probe.
    pub middleware_delay_ms: u64,

    /// Probability that the middleware probe reports a ready installation.
    pub middleware_ready_probability: f64,

    /// Version reported for a ready middleware installation.
    pub middleware_version: String,

    /// Outcome distribution for simulated authentications. Must sum to 1.0.
    pub outcome_weights: OutcomeWeights,

    /// Identity returned on simulated success.
    pub demo_identity: IdentityConfig,
}

impl Default for CacAuthConfig {
    fn default() -> Self {
        Self {
            auth_delay_min_ms: 1000,
            auth_delay_max_ms: 3000,
            middleware_delay_ms: 500,
            middleware_ready_probability: 0.9,
            middleware_version: "7.3.2".to_owned(),
            outcome_weights: OutcomeWeights::default(),
            demo_identity: IdentityConfig::default(),
        }
    }
}

impl CacAuthConfig {
    /// Check ranges that cannot be expressed in the type system.
    ///
    /// Outcome weights are checked when the outcome table is built.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` describing the first invalid setting.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.auth_delay_min_ms > self.auth_delay_max_ms {
            return Err(DomainError::InvalidDelayRange {
                min_ms: self.auth_delay_min_ms,
                max_ms: self.auth_delay_max_ms,
            });
        }

        let p = self.middleware_ready_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(DomainError::invalid_probability(
                "middleware_ready_probability",
                p,
            ));
        }

        self.demo_identity.validate()
    }
}

/// Relative frequency of each simulated authentication outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutcomeWeights {
    pub success: f64,
    pub card_not_detected: f64,
    pub invalid_pin: f64,
    pub certificate_expired: f64,
    pub certificate_revoked: f64,
}

impl Default for OutcomeWeights {
    fn default() -> Self {
        Self {
            success: 0.80,
            card_not_detected: 0.10,
            invalid_pin: 0.05,
            certificate_expired: 0.03,
            certificate_revoked: 0.02,
        }
    }
}

/// Identity fabricated for a successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub name: String,
    pub rank: String,
    pub dod_id: String,
    pub unit: String,

    /// One of `unclassified`, `secret` or `top_secret`.
    pub clearance_level: ClearanceLevel,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "John A. Smith".to_owned(),
            rank: "CPT".to_owned(),
            dod_id: "1234567890".to_owned(),
            unit: "U.S. Army Cyber Command".to_owned(),
            clearance_level: ClearanceLevel::Secret,
        }
    }
}

impl IdentityConfig {
    fn validate(&self) -> Result<(), DomainError> {
        if self.dod_id.is_empty() {
            return Err(DomainError::InvalidIdentity {
                reason: "dod_id must not be empty".to_owned(),
            });
        }
        match self.clearance_level {
            ClearanceLevel::Unclassified | ClearanceLevel::Secret | ClearanceLevel::TopSecret => {
                Ok(())
            }
            other @ (ClearanceLevel::Fouo | ClearanceLevel::Confidential) => {
                Err(DomainError::InvalidIdentity {
                    reason: format!("clearance level '{other}' is not issued to card holders"),
                })
            }
        }
    }

    #[must_use]
    pub fn to_user_record(&self) -> UserRecord {
        UserRecord::new(
            self.name.clone(),
            self.rank.clone(),
            self.dod_id.clone(),
            self.unit.clone(),
            self.clearance_level,
        )
    }
}

/// Load configuration from defaults, an optional YAML file and
/// `CAC_AUTH__*` environment variables, in increasing precedence.
///
/// # Errors
///
/// Fails if `path` is given but cannot be read or parsed, a key is
/// unknown, or the merged configuration does not pass
/// [`CacAuthConfig::validate`].
pub fn load_config(path: Option<&Path>) -> anyhow::Result<CacAuthConfig> {
    let mut figment = Figment::from(Serialized::defaults(CacAuthConfig::default()));
    if let Some(path) = path {
        figment = figment.merge(Yaml::file_exact(path));
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let cfg: CacAuthConfig = figment.extract()?;
    cfg.validate()?;
    tracing::debug!(source = ?path, "Loaded cac_auth configuration");
    Ok(cfg)
}
