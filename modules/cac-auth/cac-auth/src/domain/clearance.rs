//! Clearance comparison on string labels.

use cac_auth_sdk::ClearanceLevel;

/// Rank of an unrecognized user label: below every real level.
const UNKNOWN_USER_RANK: i32 = -1;

/// Rank of an unrecognized required label: above every real level.
const UNKNOWN_REQUIRED_RANK: i32 = i32::MAX;

/// Returns `true` if `user_clearance` is at or above `required_clearance`.
///
/// Labels must match exactly (`"top_secret"`, not `"Top Secret"`). An
/// unknown label on either side denies access.
#[must_use]
pub fn has_clearance(user_clearance: &str, required_clearance: &str) -> bool {
    let user = ClearanceLevel::from_label(user_clearance)
        .map_or(UNKNOWN_USER_RANK, ClearanceLevel::ordinal);
    let required = ClearanceLevel::from_label(required_clearance)
        .map_or(UNKNOWN_REQUIRED_RANK, ClearanceLevel::ordinal);
    user >= required
}
