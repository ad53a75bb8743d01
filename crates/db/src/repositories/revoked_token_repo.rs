//! Repository for the `revoked_tokens` table.

use keystone_core::models::RevocationEntry;
use keystone_core::types::Timestamp;
use sqlx::SqlitePool;

use crate::models::revoked_token::RevokedToken;

/// Provides ledger operations for revoked tokens.
pub struct RevokedTokenRepo;

impl RevokedTokenRepo {
    /// Insert an entry unless the token id is already present.
    ///
    /// Returns `true` if a row was inserted. An existing row is never
    /// overwritten.
    pub async fn insert(pool: &SqlitePool, entry: &RevocationEntry) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO revoked_tokens (token_id, expires_at, revoked_at)
             VALUES (?, ?, ?)
             ON CONFLICT (token_id) DO NOTHING",
        )
        .bind(&entry.token_id)
        .bind(entry.expires_at.timestamp())
        .bind(entry.revoked_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the token id has been revoked.
    pub async fn exists(pool: &SqlitePool, token_id: &str) -> Result<bool, sqlx::Error> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_id = ?)")
                .bind(token_id)
                .fetch_one(pool)
                .await?;
        Ok(found != 0)
    }

    /// Find a ledger row by token id.
    pub async fn find(
        pool: &SqlitePool,
        token_id: &str,
    ) -> Result<Option<RevokedToken>, sqlx::Error> {
        sqlx::query_as::<_, RevokedToken>(
            "SELECT token_id, expires_at, revoked_at FROM revoked_tokens WHERE token_id = ?",
        )
        .bind(token_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete rows whose token expired before `now`. Returns the count of deleted rows.
    pub async fn delete_expired(pool: &SqlitePool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
            .bind(now.timestamp())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
