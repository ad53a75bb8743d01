//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself; hashes
//! made under an older work factor keep verifying after the knob changes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use keystone_core::types::HashedCredential;

use crate::config::AuthConfig;

/// Password hashing failed (bad parameters or an internal primitive error).
#[derive(Debug, thiserror::Error)]
#[error("can't hash password: {0}")]
pub struct HashingError(String);

/// One-way password hasher with a fixed work factor.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Build a hasher whose Argon2 time cost equals `work_factor`.
    pub fn new(work_factor: u32) -> Result<Self, HashingError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            work_factor,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| HashingError(format!("invalid work factor {work_factor}: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, HashingError> {
        Self::new(config.work_factor)
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<HashedCredential, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashingError(e.to_string()))?;
        Ok(HashedCredential::new(hash.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// The comparison is constant-time. A malformed stored hash is reported
    /// exactly like a mismatch.
    pub fn verify(&self, password: &str, stored: &HashedCredential) -> bool {
        let parsed = match PasswordHash::new(stored.as_str()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Password verification error");
                false
            }
        }
    }
}
