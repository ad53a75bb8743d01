//! Keystone Auth -- password hashing, session token issuance/validation,
//! the revocation ledger, and the session flows composed from them.
//!
//! - [`password`] -- Argon2id hashing with a configurable work factor.
//! - [`token`] -- HS256 session tokens with typed claims.
//! - [`revocation`] -- ledger of explicitly invalidated token ids.
//! - [`service`] -- register / login / logout / session-check orchestration.

pub mod config;
pub mod error;
pub mod password;
pub mod revocation;
pub mod service;
pub mod token;

pub use config::{AuthConfig, ConfigError, SigningSecret};
pub use error::SessionError;
pub use revocation::{RevocationLedger, RevokeOutcome};
pub use service::{AuthenticatedUser, SessionService};
pub use token::{IssuedToken, SessionClaims, TokenCodec, TokenError};
