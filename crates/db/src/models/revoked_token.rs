//! Revocation ledger row and DTO.

use chrono::{TimeZone, Utc};
use keystone_core::models::RevocationEntry;
use keystone_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `revoked_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct RevokedToken {
    pub token_id: String,
    /// Token expiry in Unix seconds.
    pub expires_at: i64,
    pub revoked_at: Timestamp,
}

impl From<RevokedToken> for RevocationEntry {
    fn from(row: RevokedToken) -> Self {
        RevocationEntry {
            token_id: row.token_id,
            expires_at: Utc
                .timestamp_opt(row.expires_at, 0)
                .single()
                .unwrap_or_default(),
            revoked_at: row.revoked_at,
        }
    }
}
