//! Weighted outcome selection for simulated authentications.

use rand::Rng;

use super::DomainError;
use crate::config::OutcomeWeights;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A simulated authentication outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOutcome {
    Success,
    CardNotDetected,
    InvalidPin,
    CertificateExpired,
    CertificateRevoked,
}

impl AuthOutcome {
    /// Message shown to the card holder, `None` for success.
    #[must_use]
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            Self::Success => None,
            Self::CardNotDetected => {
                Some("CAC not detected. Please insert your Common Access Card and try again.")
            }
            Self::InvalidPin => Some("Invalid PIN. Please try again."),
            Self::CertificateExpired => {
                Some("Certificate has expired. Please contact your CAC issuing office.")
            }
            Self::CertificateRevoked => {
                Some("Certificate has been revoked. Please contact your security officer.")
            }
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::CardNotDetected => "card_not_detected",
            Self::InvalidPin => "invalid_pin",
            Self::CertificateExpired => "certificate_expired",
            Self::CertificateRevoked => "certificate_revoked",
        }
    }
}

/// Ordered list of `(weight, outcome)` pairs sampled with a single uniform draw.
///
/// Weights are non-negative and sum to 1.0; the table is never empty.
#[derive(Debug, Clone)]
pub struct OutcomeTable<T> {
    first: (f64, T),
    rest: Vec<(f64, T)>,
}

impl<T> OutcomeTable<T> {
    /// Build a table, checking that weights form a probability distribution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOutcomeTable` if the table is empty, a weight is
    /// negative or not finite, or the weights do not sum to 1.0.
    pub fn new(entries: Vec<(f64, T)>) -> Result<Self, DomainError> {
        let mut entries = entries.into_iter();
        let Some(first) = entries.next() else {
            return Err(DomainError::invalid_outcome_table("table is empty"));
        };
        let table = Self {
            first,
            rest: entries.collect(),
        };

        if let Some(w) = table.weights().find(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::invalid_outcome_table(format!(
                "weight {w} is not a non-negative number"
            )));
        }
        let total: f64 = table.weights().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::invalid_outcome_table(format!(
                "weights sum to {total}, expected 1.0"
            )));
        }
        Ok(table)
    }

    /// Pick the first entry whose cumulative weight reaches `draw`.
    ///
    /// A draw left unmatched by rounding in the accumulated sum falls back
    /// to the first entry. A zero-weight first entry therefore still wins a
    /// draw of exactly 0.0 and the fallback.
    #[must_use]
    pub fn select(&self, draw: f64) -> &T {
        let mut cumulative = 0.0_f64;
        for (weight, outcome) in self.entries() {
            cumulative += *weight;
            if draw <= cumulative {
                return outcome;
            }
        }
        &self.first.1
    }

    /// Select with a uniform draw in `[0, 1)` from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        self.select(rng.random::<f64>())
    }

    fn entries(&self) -> impl Iterator<Item = &(f64, T)> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    fn weights(&self) -> impl Iterator<Item = f64> {
        self.entries().map(|(w, _)| *w)
    }
}

impl OutcomeTable<AuthOutcome> {
    /// Build the authentication table in its declared order:
    /// success, card not detected, invalid PIN, expired, revoked.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOutcomeTable` if the weights are not a distribution.
    pub fn from_weights(weights: &OutcomeWeights) -> Result<Self, DomainError> {
        Self::new(vec![
            (weights.success, AuthOutcome::Success),
            (weights.card_not_detected, AuthOutcome::CardNotDetected),
            (weights.invalid_pin, AuthOutcome::InvalidPin),
            (weights.certificate_expired, AuthOutcome::CertificateExpired),
            (weights.certificate_revoked, AuthOutcome::CertificateRevoked),
        ])
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn default_table() -> OutcomeTable<AuthOutcome> {
        OutcomeTable::from_weights(&OutcomeWeights::default()).unwrap()
    }

    #[test]
    fn select_walks_cumulative_weights_in_order() {
        let table = default_table();
        assert_eq!(*table.select(0.0), AuthOutcome::Success);
        assert_eq!(*table.select(0.79), AuthOutcome::Success);
        assert_eq!(*table.select(0.85), AuthOutcome::CardNotDetected);
        assert_eq!(*table.select(0.92), AuthOutcome::InvalidPin);
        assert_eq!(*table.select(0.96), AuthOutcome::CertificateExpired);
        assert_eq!(*table.select(0.99), AuthOutcome::CertificateRevoked);
    }

    #[test]
    fn draw_beyond_cumulative_sum_falls_back_to_first_entry() {
        let table = OutcomeTable::new(vec![(0.5, "a"), (0.5, "b")]).unwrap();
        assert_eq!(*table.select(1.5), "a");
        assert_eq!(*table.select(f64::NAN), "a");
    }

    #[test]
    fn zero_weight_first_entry_only_wins_zero_draw_or_fallback() {
        let table = OutcomeTable::new(vec![(0.0, "first"), (1.0, "second")]).unwrap();
        assert_eq!(*table.select(0.0), "first");
        assert_eq!(*table.select(f64::MIN_POSITIVE), "second");
        assert_eq!(*table.select(2.0), "first");

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(*table.sample(&mut rng), "second");
        }
    }

    #[test]
    fn zero_weight_later_entries_are_never_selected() {
        let table = OutcomeTable::new(vec![(1.0, "always"), (0.0, "never")]).unwrap();
        for draw in [0.0, 0.5, 1.0, 1.5] {
            assert_eq!(*table.select(draw), "always");
        }
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(OutcomeTable::<u8>::new(vec![]).is_err());
        assert!(OutcomeTable::new(vec![(0.5, 1), (0.4, 2)]).is_err());
        assert!(OutcomeTable::new(vec![(1.5, 1), (-0.5, 2)]).is_err());
        assert!(OutcomeTable::new(vec![(f64::INFINITY, 1)]).is_err());
    }

    #[test]
    fn sampled_frequencies_track_weights() {
        const TRIALS: u32 = 20_000;
        let table = default_table();
        let mut rng = StdRng::seed_from_u64(0x00CA_C0DE);
        let mut counts: HashMap<AuthOutcome, u32> = HashMap::new();
        for _ in 0..TRIALS {
            *counts.entry(*table.sample(&mut rng)).or_default() += 1;
        }

        let total = f64::from(TRIALS);
        let rate = |o: AuthOutcome| f64::from(counts.get(&o).copied().unwrap_or(0)) / total;
        assert!((rate(AuthOutcome::Success) - 0.80).abs() < 0.02);
        assert!((rate(AuthOutcome::CardNotDetected) - 0.10).abs() < 0.015);
        assert!((rate(AuthOutcome::InvalidPin) - 0.05).abs() < 0.01);
        assert!((rate(AuthOutcome::CertificateExpired) - 0.03).abs() < 0.01);
        assert!((rate(AuthOutcome::CertificateRevoked) - 0.02).abs() < 0.01);
    }

    #[test]
    fn only_success_has_no_error_message() {
        assert!(AuthOutcome::Success.error_message().is_none());
        for outcome in [
            AuthOutcome::CardNotDetected,
            AuthOutcome::InvalidPin,
            AuthOutcome::CertificateExpired,
            AuthOutcome::CertificateRevoked,
        ] {
            assert!(outcome.error_message().is_some(), "{outcome:?}");
        }
    }
}
