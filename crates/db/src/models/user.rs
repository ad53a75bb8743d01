//! User entity model and DTOs.

use keystone_core::types::{DbId, HashedCredential, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never log or return it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl User {
    pub fn credential(&self) -> HashedCredential {
        HashedCredential::new(self.password_hash.clone())
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub login: String,
    pub password_hash: HashedCredential,
}
