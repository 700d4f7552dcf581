//! Local (in-process) client for the CAC auth simulator.

use std::sync::Arc;

use async_trait::async_trait;
use cac_auth_sdk::{
    AuthResult, CacAuthClient, CacAuthError, Certificate, MiddlewareStatus, ValidationResult,
};

use super::{Service, certificate, clearance};
use crate::config::CacAuthConfig;

/// Local client wrapping the service.
///
/// Consumers hold it as `Arc<dyn CacAuthClient>`.
pub struct CacAuthLocalClient {
    svc: Arc<Service>,
}

impl CacAuthLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }

    /// Build the service from configuration and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is rejected.
    pub fn from_config(cfg: &CacAuthConfig) -> Result<Self, CacAuthError> {
        let svc = Service::from_config(cfg).map_err(|e| {
            tracing::error!(error = %e, "cac_auth configuration rejected");
            CacAuthError::from(e)
        })?;
        Ok(Self::new(Arc::new(svc)))
    }
}

#[async_trait]
impl CacAuthClient for CacAuthLocalClient {
    async fn simulate_auth(&self, certificate_data: Option<&str>, pin: Option<&str>) -> AuthResult {
        self.svc.simulate_auth(certificate_data, pin).await
    }

    fn validate_certificate(&self, cert: &Certificate) -> ValidationResult {
        certificate::validate_certificate(cert)
    }

    fn has_clearance(&self, user_clearance: &str, required_clearance: &str) -> bool {
        clearance::has_clearance(user_clearance, required_clearance)
    }

    fn log_attempt(&self, result: &AuthResult, ip_address: &str, user_agent: &str) {
        self.svc.log_attempt(result, ip_address, user_agent);
    }

    async fn check_middleware(&self) -> MiddlewareStatus {
        self.svc.check_middleware().await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::OutcomeWeights;

    #[test]
    fn from_config_maps_domain_errors_to_invalid_config() {
        let cfg = CacAuthConfig {
            outcome_weights: OutcomeWeights {
                success: 0.0,
                ..OutcomeWeights::default()
            },
            ..CacAuthConfig::default()
        };
        match CacAuthLocalClient::from_config(&cfg) {
            Err(CacAuthError::InvalidConfig(msg)) => {
                assert!(msg.contains("outcome table"), "unexpected message: {msg}");
            }
            Err(other) => panic!("Expected InvalidConfig, got: {other:?}"),
            Ok(_) => panic!("Expected InvalidConfig, got a client"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn trait_object_delegates_to_service() {
        let client = CacAuthLocalClient::from_config(&CacAuthConfig::default()).unwrap();
        let cac: &dyn CacAuthClient = &client;

        let result = cac.simulate_auth(None, None).await;
        assert_eq!(result.is_success(), result.user().is_some());

        assert!(cac.has_clearance("secret", "confidential"));
        assert!(!cac.has_clearance("fouo", "secret"));
    }
}
