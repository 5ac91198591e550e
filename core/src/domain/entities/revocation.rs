//! Per-user session revocation record.

use serde::{Deserialize, Serialize};

/// Marks every token of a user issued at or before `invalidated_before` as revoked.
///
/// At most one record exists per email. A user with no record has never
/// had their sessions revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Subject whose sessions are revoked
    pub email: String,

    /// Cut-off, seconds since epoch
    pub invalidated_before: i64,
}

impl RevocationRecord {
    pub fn new(email: impl Into<String>, invalidated_before: i64) -> Self {
        Self {
            email: email.into(),
            invalidated_before,
        }
    }

    /// Whether a token issued at `iat` falls under this revocation
    pub fn revokes(&self, iat: i64) -> bool {
        iat <= self.invalidated_before
    }
}
