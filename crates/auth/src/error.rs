//! Error kinds returned by the session flows.
//!
//! Every flow returns one of these as a typed result; the HTTP boundary alone
//! decides how each kind is rendered. None of them is retried.

use keystone_core::error::CoreError;

use crate::password::HashingError;
use crate::token::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A registration field violates the length policy.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("user already exists: {login}")]
    Conflict { login: String },

    /// Unknown login, or a token subject whose user row is gone.
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid password")]
    InvalidCredential,

    #[error("invalid authorization header, expected `Bearer <token>`")]
    MalformedHeader,

    /// Bad format, bad signature, wrong algorithm, or expired.
    #[error("unknown token: {0}")]
    UnknownToken(TokenError),

    #[error("token revoked")]
    TokenRevoked,

    /// The token verified but does not carry the expected claims.
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("store failure: {0}")]
    StoreFailure(#[source] CoreError),

    #[error(transparent)]
    HashingFailure(#[from] HashingError),

    #[error("can't generate session token: {0}")]
    SigningFailure(String),
}

impl From<TokenError> for SessionError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingClaims(reason) => SessionError::InvalidClaims(reason),
            TokenError::Signing(reason) => SessionError::SigningFailure(reason),
            other => SessionError::UnknownToken(other),
        }
    }
}

impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, key } => {
                SessionError::NotFound(format!("{entity} `{key}`"))
            }
            other => SessionError::StoreFailure(other),
        }
    }
}
