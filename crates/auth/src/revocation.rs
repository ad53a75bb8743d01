//! Revocation ledger for explicitly terminated sessions.

use chrono::Utc;
use keystone_core::error::CoreResult;
use keystone_core::models::RevocationEntry;
use keystone_core::repository::RevocationStore;
use keystone_core::types::Timestamp;

/// Result of [`RevocationLedger::revoke`].
///
/// Revoking is idempotent: a second revocation of the same id succeeds and
/// leaves the first entry as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked,
    AlreadyRevoked,
}

/// Records invalidated token ids and answers "is this id revoked?".
pub struct RevocationLedger<R> {
    store: R,
}

impl<R: RevocationStore> RevocationLedger<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// Revoke `token_id`, remembering when the token would have expired.
    pub async fn revoke(&self, token_id: &str, expires_at: Timestamp) -> CoreResult<RevokeOutcome> {
        let entry = RevocationEntry {
            token_id: token_id.to_string(),
            expires_at,
            revoked_at: Utc::now(),
        };

        if self.store.insert_revocation(&entry).await? {
            Ok(RevokeOutcome::Revoked)
        } else {
            Ok(RevokeOutcome::AlreadyRevoked)
        }
    }

    pub async fn is_revoked(&self, token_id: &str) -> CoreResult<bool> {
        self.store.is_revoked(token_id).await
    }

    /// Drop entries for tokens that have expired by `now`; they can no
    /// longer authenticate anything.
    pub async fn purge_expired(&self, now: Timestamp) -> CoreResult<u64> {
        self.store.purge_expired(now).await
    }
}
