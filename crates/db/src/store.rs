//! SQL implementation of the core store contracts.

use keystone_core::error::{CoreError, CoreResult};
use keystone_core::models::{RevocationEntry, StoredCredential};
use keystone_core::repository::{CredentialStore, RevocationStore};
use keystone_core::types::{DbId, HashedCredential, Timestamp};

use crate::models::user::CreateUser;
use crate::repositories::{RevokedTokenRepo, UserRepo};
use crate::DbPool;

/// Credential and revocation store backed by one SQLite pool.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct SqlStore {
    pool: DbPool,
}

impl SqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Classify a sqlx error into a [`CoreError`].
///
/// - Unique constraint violations map to `Conflict`.
/// - Everything else maps to `Internal`; `RowNotFound` never reaches here
///   because lookups use `fetch_optional`.
fn store_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return CoreError::Conflict(db_err.message().to_string());
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}

fn user_not_found(key: impl ToString) -> CoreError {
    CoreError::NotFound {
        entity: "user",
        key: key.to_string(),
    }
}

impl CredentialStore for SqlStore {
    async fn exists_by_login(&self, login: &str) -> CoreResult<bool> {
        UserRepo::exists_by_login(&self.pool, login)
            .await
            .map_err(store_error)
    }

    async fn insert(&self, login: &str, password_hash: &HashedCredential) -> CoreResult<DbId> {
        let input = CreateUser {
            login: login.to_string(),
            password_hash: password_hash.clone(),
        };
        let user = UserRepo::create(&self.pool, &input)
            .await
            .map_err(store_error)?;
        Ok(user.id)
    }

    async fn id_by_login(&self, login: &str) -> CoreResult<DbId> {
        UserRepo::find_by_login(&self.pool, login)
            .await
            .map_err(store_error)?
            .map(|user| user.id)
            .ok_or_else(|| user_not_found(login))
    }

    async fn login_by_id(&self, id: DbId) -> CoreResult<String> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
            .map(|user| user.login)
            .ok_or_else(|| user_not_found(id))
    }

    async fn credential_by_login(&self, login: &str) -> CoreResult<Option<StoredCredential>> {
        let user = UserRepo::find_by_login(&self.pool, login)
            .await
            .map_err(store_error)?;
        Ok(user.map(|user| StoredCredential {
            user_id: user.id,
            password_hash: user.credential(),
        }))
    }
}

impl RevocationStore for SqlStore {
    async fn insert_revocation(&self, entry: &RevocationEntry) -> CoreResult<bool> {
        RevokedTokenRepo::insert(&self.pool, entry)
            .await
            .map_err(store_error)
    }

    async fn is_revoked(&self, token_id: &str) -> CoreResult<bool> {
        RevokedTokenRepo::exists(&self.pool, token_id)
            .await
            .map_err(store_error)
    }

    async fn purge_expired(&self, now: Timestamp) -> CoreResult<u64> {
        RevokedTokenRepo::delete_expired(&self.pool, now)
            .await
            .map_err(store_error)
    }
}
