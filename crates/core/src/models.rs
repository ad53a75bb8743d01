//! Domain records shared between the auth layer and the store.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, HashedCredential, Timestamp};

/// What login needs from a user row: its id and stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user_id: DbId,
    pub password_hash: HashedCredential,
}

/// A token that was explicitly invalidated before its natural expiry.
///
/// Keyed by the token's unique identifier (`jti` claim). Once an entry
/// exists, the identifier is never trusted again, whatever its signature
/// or expiry says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    pub token_id: String,
    /// When the revoked token would have expired on its own.
    pub expires_at: Timestamp,
    pub revoked_at: Timestamp,
}

impl RevocationEntry {
    /// An entry is redundant once the token it blocks has expired anyway.
    pub fn is_redundant_at(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }
}
