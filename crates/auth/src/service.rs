//! Session service -- registration, login, logout, and session checks.

use chrono::Utc;
use keystone_core::error::CoreError;
use keystone_core::repository::{CredentialStore, RevocationStore};
use keystone_core::types::{DbId, Timestamp};

use crate::config::AuthConfig;
use crate::error::SessionError;
use crate::password::{CredentialHasher, HashingError};
use crate::revocation::{RevocationLedger, RevokeOutcome};
use crate::token::{IssuedToken, TokenCodec};

/// Prefix of the `Authorization` header value carrying a session token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity behind a valid, unrevoked session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: DbId,
    pub login: String,
    pub expires_at: Timestamp,
}

/// Extract the token from an `Authorization` header value.
pub fn parse_bearer(authorization: &str) -> Result<&str, SessionError> {
    authorization
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
        .ok_or(SessionError::MalformedHeader)
}

/// Orchestrates the session flows over a credential store and a revocation
/// store.
///
/// Generic over the store implementations so this crate has no dependency on
/// the database crate. Holds no per-request state; share it behind an `Arc`.
pub struct SessionService<U, R> {
    users: U,
    ledger: RevocationLedger<R>,
    hasher: CredentialHasher,
    codec: TokenCodec,
    min_login_length: usize,
    min_password_length: usize,
}

impl<U: CredentialStore, R: RevocationStore> SessionService<U, R> {
    pub fn new(users: U, revocations: R, config: &AuthConfig) -> Result<Self, HashingError> {
        Ok(Self {
            users,
            ledger: RevocationLedger::new(revocations),
            hasher: CredentialHasher::from_config(config)?,
            codec: TokenCodec::new(config),
            min_login_length: config.min_login_length,
            min_password_length: config.min_password_length,
        })
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Create a user and open a session for it.
    pub async fn register(&self, login: &str, password: &str) -> Result<IssuedToken, SessionError> {
        // 1. Length policy, measured in UTF-8 bytes.
        if login.len() < self.min_login_length {
            return Err(SessionError::InvalidInput {
                field: "login",
                reason: format!("must be at least {} bytes", self.min_login_length),
            });
        }
        if password.len() < self.min_password_length {
            return Err(SessionError::InvalidInput {
                field: "password",
                reason: format!("must be at least {} bytes", self.min_password_length),
            });
        }

        // 2. Pre-check; the UNIQUE constraint below is the real guard.
        if self
            .users
            .exists_by_login(login)
            .await
            .map_err(SessionError::StoreFailure)?
        {
            return Err(SessionError::Conflict {
                login: login.to_string(),
            });
        }

        // 3. Hash and insert.
        let password_hash = self.hasher.hash(password)?;
        let user_id = self
            .users
            .insert(login, &password_hash)
            .await
            .map_err(|e| match e {
                CoreError::Conflict(_) => SessionError::Conflict {
                    login: login.to_string(),
                },
                other => SessionError::StoreFailure(other),
            })?;

        // 4. Open the first session.
        let issued = self.codec.issue(user_id)?;
        tracing::info!(user_id, login, "User registered");
        Ok(issued)
    }

    /// Check a login/password pair and open a session.
    pub async fn login(&self, login: &str, password: &str) -> Result<IssuedToken, SessionError> {
        // 1. The user must exist. A failed lookup reads as "not found".
        let stored = match self.users.credential_by_login(login).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return Err(SessionError::NotFound(format!("user `{login}`"))),
            Err(e) => {
                tracing::warn!(error = %e, login, "User lookup failed during login");
                return Err(SessionError::NotFound(format!("user `{login}`")));
            }
        };

        // 2. Verify the password.
        if !self.hasher.verify(password, &stored.password_hash) {
            tracing::warn!(login, "Rejected login: wrong password");
            return Err(SessionError::InvalidCredential);
        }

        // 3. Issue a token for the id read alongside the hash.
        let user_id = stored.user_id;
        let issued = self.codec.issue(user_id)?;
        tracing::info!(user_id, "User logged in");
        Ok(issued)
    }

    /// Terminate the session whose token is in `authorization`.
    pub async fn logout(&self, authorization: &str) -> Result<RevokeOutcome, SessionError> {
        let token = parse_bearer(authorization)?;
        let claims = self.codec.validate(token)?;

        let outcome = self
            .ledger
            .revoke(&claims.jti, claims.expires_at())
            .await
            .map_err(SessionError::StoreFailure)?;

        tracing::info!(user_id = claims.sub, ?outcome, "Session terminated");
        Ok(outcome)
    }

    /// Resolve the user behind the session token in `authorization`.
    ///
    /// The ledger is consulted before the signature is checked, so a revoked
    /// token is refused even while it is otherwise perfectly valid.
    pub async fn check_session(
        &self,
        authorization: &str,
    ) -> Result<AuthenticatedUser, SessionError> {
        let token = parse_bearer(authorization)?;

        // 1. Revocation first.
        let token_id = self
            .codec
            .peek_token_id(token)
            .map_err(SessionError::UnknownToken)?;
        if self
            .ledger
            .is_revoked(&token_id)
            .await
            .map_err(SessionError::StoreFailure)?
        {
            tracing::debug!("Rejected revoked session token");
            return Err(SessionError::TokenRevoked);
        }

        // 2. Signature, algorithm, expiry, claims.
        let claims = self.codec.validate(token)?;

        // 3. The subject must still exist.
        let login = self.users.login_by_id(claims.sub).await?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            login,
            expires_at: claims.expires_at(),
        })
    }

    /// Remove ledger entries whose tokens have expired on their own.
    pub async fn purge_expired_revocations(&self) -> Result<u64, SessionError> {
        self.ledger
            .purge_expired(Utc::now())
            .await
            .map_err(SessionError::StoreFailure)
    }
}
