//! Session token generation.

use chrono::Utc;
use rand::Rng;

const TOKEN_PREFIX: &str = "CAC";
const FRAGMENT_LEN: usize = 9;
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an opaque session token `CAC_<epoch millis>_<base36 fragment>`.
///
/// Uniqueness is best-effort. The token is not a credential.
#[must_use]
pub fn generate_session_token() -> String {
    let fragment = random_fragment(&mut rand::rng());
    format!(
        "{TOKEN_PREFIX}_{}_{fragment}",
        Utc::now().timestamp_millis()
    )
}

fn random_fragment<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..FRAGMENT_LEN)
        .map(|_| char::from(BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn token_matches_expected_format() {
        let re = Regex::new(r"^CAC_\d+_[0-9a-z]+$").unwrap();
        for _ in 0..100 {
            let token = generate_session_token();
            assert!(re.is_match(&token), "unexpected token format: {token}");
        }
    }

    #[test]
    fn token_embeds_current_timestamp() {
        let before = Utc::now().timestamp_millis();
        let token = generate_session_token();
        let after = Utc::now().timestamp_millis();

        let millis: i64 = token.split('_').nth(1).unwrap().parse().unwrap();
        assert!((before..=after).contains(&millis));
    }

    #[test]
    fn fragment_has_fixed_length() {
        let token = generate_session_token();
        assert_eq!(token.rsplit('_').next().unwrap().len(), FRAGMENT_LEN);
    }
}
