//! Service implementation for the CAC auth simulator.

use std::sync::Arc;
use std::time::Duration;

use cac_auth_sdk::{AttemptSink, AuthResult, MiddlewareStatus, UserRecord};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info, warn};

use super::DomainError;
use super::attempt_log::{TracingAttemptSink, build_attempt_record};
use super::outcome::{AuthOutcome, OutcomeTable};
use super::token::generate_session_token;
use crate::config::CacAuthConfig;

/// CAC auth simulator.
///
/// Holds the validated configuration and the attempt sink. Every call draws
/// its own randomness, so one instance can serve concurrent callers.
pub struct Service {
    auth_delay_min: Duration,
    auth_delay_max: Duration,
    middleware_delay: Duration,
    middleware_ready_probability: f64,
    middleware_version: String,
    outcomes: OutcomeTable<AuthOutcome>,
    demo_user: UserRecord,
    sink: Arc<dyn AttemptSink>,
}

impl Service {
    /// Create a service that logs attempts through [`TracingAttemptSink`].
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the configuration is out of range or the
    /// outcome weights do not sum to 1.0.
    pub fn from_config(cfg: &CacAuthConfig) -> Result<Self, DomainError> {
        cfg.validate()?;
        let outcomes = OutcomeTable::from_weights(&cfg.outcome_weights)?;

        warn!(
            "CAC auth service is a simulation: outcomes are random and certificates \
             are not cryptographically verified. Do NOT use it for access control."
        );
        info!(
            auth_delay_min_ms = cfg.auth_delay_min_ms,
            auth_delay_max_ms = cfg.auth_delay_max_ms,
            middleware_delay_ms = cfg.middleware_delay_ms,
            middleware_ready_probability = cfg.middleware_ready_probability,
            success_weight = cfg.outcome_weights.success,
            "Initialized cac_auth service"
        );

        Ok(Self {
            auth_delay_min: Duration::from_millis(cfg.auth_delay_min_ms),
            auth_delay_max: Duration::from_millis(cfg.auth_delay_max_ms),
            middleware_delay: Duration::from_millis(cfg.middleware_delay_ms),
            middleware_ready_probability: cfg.middleware_ready_probability,
            middleware_version: cfg.middleware_version.clone(),
            outcomes,
            demo_user: cfg.demo_identity.to_user_record(),
            sink: Arc::new(TracingAttemptSink),
        })
    }

    /// Replace the attempt sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn AttemptSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Simulate a card read and PIN check.
    ///
    /// The inputs are accepted for API compatibility and never inspected.
    #[tracing::instrument(skip_all)]
    pub async fn simulate_auth(
        &self,
        certificate_data: Option<&str>,
        pin: Option<&str>,
    ) -> AuthResult {
        debug!(
            has_certificate = certificate_data.is_some(),
            has_pin = pin.is_some(),
            "Simulating CAC authentication"
        );

        let delay = self.auth_delay();
        tokio::time::sleep(delay).await;

        let outcome = *self.outcomes.sample(&mut rand::rng());
        debug!(
            outcome = outcome.as_str(),
            delay_ms = delay.as_millis(),
            "Simulated CAC outcome"
        );
        self.result_for(outcome)
    }

    /// Materialize the result for an outcome. Success gets the demo
    /// identity and a fresh session token.
    #[must_use]
    pub fn result_for(&self, outcome: AuthOutcome) -> AuthResult {
        match outcome.error_message() {
            None => AuthResult::success(self.demo_user.clone(), generate_session_token()),
            Some(message) => AuthResult::failure(message),
        }
    }

    /// Build an attempt record stamped with the current time and hand it to the sink.
    pub fn log_attempt(&self, result: &AuthResult, ip_address: &str, user_agent: &str) {
        let record = build_attempt_record(result, ip_address, user_agent, Utc::now());
        self.sink.record(&record);
    }

    /// Simulate a probe of the smart-card middleware installation.
    #[tracing::instrument(skip_all)]
    pub async fn check_middleware(&self) -> MiddlewareStatus {
        tokio::time::sleep(self.middleware_delay).await;

        let draw = rand::rng().random::<f64>();
        let status = middleware_status_for_draw(
            draw,
            self.middleware_ready_probability,
            &self.middleware_version,
        );
        debug!(status = ?status.status, "Simulated middleware probe");
        status
    }

    fn auth_delay(&self) -> Duration {
        if self.auth_delay_max > self.auth_delay_min {
            rand::rng().random_range(self.auth_delay_min..self.auth_delay_max)
        } else {
            self.auth_delay_min
        }
    }
}

/// Map a uniform draw to a middleware status: below `ready_probability`
/// the middleware is installed and ready, otherwise not installed.
#[must_use]
pub fn middleware_status_for_draw(
    draw: f64,
    ready_probability: f64,
    version: &str,
) -> MiddlewareStatus {
    if draw < ready_probability {
        MiddlewareStatus::ready(version)
    } else {
        MiddlewareStatus::not_installed()
    }
}
