//! Authentication attempt records and the sinks that receive them.

use std::collections::VecDeque;

use cac_auth_sdk::{AttemptRecord, AttemptSink, AuthResult, UserRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;

/// `tracing` target for security attempt events.
pub const SECURITY_LOG_TARGET: &str = "cac_auth::security";

/// User value recorded when the attempt produced no identity.
pub const UNKNOWN_USER: &str = "unknown";

/// Build the log record for an attempt observed at `now`.
#[must_use]
pub fn build_attempt_record(
    result: &AuthResult,
    ip_address: &str,
    user_agent: &str,
    now: DateTime<Utc>,
) -> AttemptRecord {
    AttemptRecord {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        success: result.is_success(),
        user: logged_user(result.user()).to_owned(),
        ip_address: ip_address.to_owned(),
        user_agent: user_agent.to_owned(),
        error: result.error().map(str::to_owned),
    }
}

/// Default sink: one structured `tracing` event per attempt.
///
/// Successful attempts are logged at `INFO`, failures at `WARN`. The full
/// record is attached as JSON in the `record` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAttemptSink;

impl AttemptSink for TracingAttemptSink {
    fn record(&self, record: &AttemptRecord) {
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(
                    target: SECURITY_LOG_TARGET,
                    error = %e,
                    "Failed to encode attempt record"
                );
                return;
            }
        };

        if record.success {
            tracing::info!(
                target: SECURITY_LOG_TARGET,
                user = %record.user,
                ip_address = %record.ip_address,
                record = %json,
                "CAC authentication succeeded"
            );
        } else {
            tracing::warn!(
                target: SECURITY_LOG_TARGET,
                user = %record.user,
                ip_address = %record.ip_address,
                error = record.error.as_deref().unwrap_or_default(),
                record = %json,
                "CAC authentication failed"
            );
        }
    }
}

/// Sink that keeps records in memory.
///
/// An unbounded sink (`new`) grows until drained with [`take`](Self::take);
/// long-running callers should drain it periodically or use
/// [`bounded`](Self::bounded), which keeps only the most recent records.
#[derive(Debug, Default)]
pub struct MemoryAttemptSink {
    records: Mutex<VecDeque<AttemptRecord>>,
    capacity: Option<usize>,
}

impl MemoryAttemptSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink holding at most `capacity` records; the oldest is evicted first.
    /// A capacity of zero keeps nothing.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    /// Snapshot of the records currently held, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<AttemptRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Drain and return all held records.
    #[must_use]
    pub fn take(&self) -> Vec<AttemptRecord> {
        std::mem::take(&mut *self.records.lock()).into()
    }
}

impl AttemptSink for MemoryAttemptSink {
    fn record(&self, record: &AttemptRecord) {
        let mut records = self.records.lock();
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while records.len() >= capacity {
                records.pop_front();
            }
        }
        records.push_back(record.clone());
    }
}

/// Returns the `DoD` ID logged for `user`, or [`UNKNOWN_USER`].
#[must_use]
pub fn logged_user(user: Option<&UserRecord>) -> &str {
    user.map_or(UNKNOWN_USER, UserRecord::dod_id)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use cac_auth_sdk::ClearanceLevel;
    use chrono::TimeZone;
    use tracing_test::traced_test;

    use super::*;

    fn success() -> AuthResult {
        let user = UserRecord::new(
            "John A. Smith",
            "CPT",
            "1234567890",
            "U.S. Army Cyber Command",
            ClearanceLevel::Secret,
        );
        AuthResult::success(user, "CAC_1700000000000_abc123xyz")
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 5).unwrap()
    }

    #[test]
    fn failed_attempt_without_user_is_logged_as_unknown() {
        let result = AuthResult::failure("Invalid PIN. Please try again.");
        let record = build_attempt_record(&result, "192.0.2.10", "curl/8.5", at());

        assert!(!record.success);
        assert_eq!(record.user, UNKNOWN_USER);
        assert_eq!(
            record.error.as_deref(),
            Some("Invalid PIN. Please try again.")
        );
        assert_eq!(record.ip_address, "192.0.2.10");
        assert_eq!(record.user_agent, "curl/8.5");
    }

    #[test]
    fn successful_attempt_records_dod_id() {
        let record = build_attempt_record(&success(), "192.0.2.11", "Mozilla/5.0", at());
        assert!(record.success);
        assert_eq!(record.user, "1234567890");
        assert!(record.error.is_none());
    }

    #[test]
    fn timestamp_is_rfc3339_utc_with_millis() {
        let record = build_attempt_record(&success(), "192.0.2.11", "Mozilla/5.0", at());
        assert_eq!(record.timestamp, "2026-10-19T08:30:05.000Z");
        assert!(DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = build_attempt_record(&success(), "192.0.2.11", "Mozilla/5.0", at());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ipAddress"], "192.0.2.11");
        assert_eq!(json["userAgent"], "Mozilla/5.0");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn memory_sink_keeps_records_in_order() {
        let sink = MemoryAttemptSink::new();
        let first = build_attempt_record(&success(), "192.0.2.1", "a", at());
        let second = build_attempt_record(&AuthResult::failure("x"), "192.0.2.2", "b", at());
        sink.record(&first);
        sink.record(&second);

        assert_eq!(sink.records(), vec![first.clone(), second.clone()]);
        assert_eq!(sink.take(), vec![first, second]);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn bounded_memory_sink_evicts_oldest_records() {
        let sink = MemoryAttemptSink::bounded(2);
        let records: Vec<_> = ["192.0.2.1", "192.0.2.2", "192.0.2.3"]
            .into_iter()
            .map(|ip| build_attempt_record(&AuthResult::failure("x"), ip, "ua", at()))
            .collect();
        for record in &records {
            sink.record(record);
        }

        assert_eq!(sink.records(), records[1..]);
        assert_eq!(sink.take().len(), 2);
        sink.record(&records[0]);
        assert_eq!(sink.records(), records[..1]);
    }

    #[test]
    fn zero_capacity_sink_keeps_nothing() {
        let sink = MemoryAttemptSink::bounded(0);
        sink.record(&build_attempt_record(&success(), "192.0.2.1", "ua", at()));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn logged_user_falls_back_to_unknown() {
        assert_eq!(logged_user(None), UNKNOWN_USER);
        assert_eq!(logged_user(success().user()), "1234567890");
    }

    #[test]
    #[traced_test]
    fn tracing_sink_emits_security_event() {
        let result = AuthResult::failure("Certificate has been revoked.");
        TracingAttemptSink.record(&build_attempt_record(&result, "198.51.100.4", "ua", at()));

        assert!(logs_contain("CAC authentication failed"));
        assert!(logs_contain("198.51.100.4"));
        assert!(logs_contain("Certificate has been revoked."));
    }
}
