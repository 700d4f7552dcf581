//! Destination for authentication attempt records.

use crate::models::AttemptRecord;

/// Receives one record per logged authentication attempt.
///
/// Implementations forward records to a security event pipeline (stdout,
/// a log collector, a SIEM). Delivery is fire-and-forget: `record` has no
/// return value and implementations must not panic on write failures.
pub trait AttemptSink: Send + Sync {
    /// Forward a single attempt record.
    fn record(&self, record: &AttemptRecord);
}
