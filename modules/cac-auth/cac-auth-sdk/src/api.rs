//! Public API trait for the CAC auth simulator.

use async_trait::async_trait;

use crate::models::{AuthResult, Certificate, MiddlewareStatus, ValidationResult};

/// Public API trait for the CAC auth simulator.
///
/// None of the operations return errors. A failed authentication is an
/// [`AuthResult`] with `success() == false`, a rejected certificate is a
/// [`ValidationResult`] with a non-empty error list, and unknown clearance
/// labels simply deny access.
///
/// ```ignore
/// let cac: Arc<dyn CacAuthClient> = Arc::new(CacAuthLocalClient::new(svc));
///
/// let status = cac.check_middleware().await;
/// if status.is_ready() {
///     let result = cac.simulate_auth(None, Some(pin)).await;
///     cac.log_attempt(&result, remote_ip, user_agent);
/// }
/// ```
#[async_trait]
pub trait CacAuthClient: Send + Sync {
    /// Simulate a card authentication.
    ///
    /// # Arguments
    ///
    /// * `certificate_data` - Raw certificate payload (accepted, never inspected)
    /// * `pin` - Card PIN (accepted, never inspected)
    async fn simulate_auth(&self, certificate_data: Option<&str>, pin: Option<&str>) -> AuthResult;

    /// Check certificate validity window, issuer and key usage against the current time.
    fn validate_certificate(&self, cert: &Certificate) -> ValidationResult;

    /// Returns `true` if `user_clearance` is at or above `required_clearance`.
    ///
    /// Unknown labels on either side deny access.
    fn has_clearance(&self, user_clearance: &str, required_clearance: &str) -> bool;

    /// Record an authentication attempt in the security log.
    fn log_attempt(&self, result: &AuthResult, ip_address: &str, user_agent: &str);

    /// Simulate a probe of the smart-card middleware installation.
    async fn check_middleware(&self) -> MiddlewareStatus;
}
