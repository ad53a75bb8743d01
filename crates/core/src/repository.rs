//! Store contracts consumed by the session subsystem.
//!
//! Implementations live in `keystone-db`. Every call re-reads the store, so
//! any number of service instances sharing one store observe the same state.

use std::future::Future;

use crate::error::CoreResult;
use crate::models::{RevocationEntry, StoredCredential};
use crate::types::{DbId, HashedCredential, Timestamp};

/// Persistent user table.
///
/// Login uniqueness must be enforced by the storage layer itself: two
/// concurrent `insert` calls for the same login yield one id and one
/// [`CoreError::Conflict`](crate::error::CoreError::Conflict).
pub trait CredentialStore: Send + Sync {
    fn exists_by_login(&self, login: &str) -> impl Future<Output = CoreResult<bool>> + Send;

    /// Insert a user and return its new id.
    fn insert(
        &self,
        login: &str,
        password_hash: &HashedCredential,
    ) -> impl Future<Output = CoreResult<DbId>> + Send;

    fn id_by_login(&self, login: &str) -> impl Future<Output = CoreResult<DbId>> + Send;

    fn login_by_id(&self, id: DbId) -> impl Future<Output = CoreResult<String>> + Send;

    /// Id and password hash for `login` in one read; `None` if no such user.
    fn credential_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = CoreResult<Option<StoredCredential>>> + Send;
}

/// Persistent revocation ledger storage, keyed uniquely by token id.
pub trait RevocationStore: Send + Sync {
    /// Record an entry. Returns `false` when the token id was already present;
    /// the existing row is left untouched.
    fn insert_revocation(
        &self,
        entry: &RevocationEntry,
    ) -> impl Future<Output = CoreResult<bool>> + Send;

    fn is_revoked(&self, token_id: &str) -> impl Future<Output = CoreResult<bool>> + Send;

    /// Delete entries whose token expired before `now`. Returns the count.
    fn purge_expired(&self, now: Timestamp) -> impl Future<Output = CoreResult<u64>> + Send;
}
