//! HS256 session token issuance and validation.
//!
//! A session token is a compact JWS carrying [`SessionClaims`]. The signature
//! covers every claim. Each token carries a random `jti`, which is the key
//! the revocation ledger uses.

use chrono::{TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use keystone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

/// The only algorithm tokens are signed and accepted with.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4), used as the revocation key.
    pub jti: String,
}

impl SessionClaims {
    /// `exp` as a timestamp. Out-of-range values clamp to the epoch.
    pub fn expires_at(&self) -> Timestamp {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

impl IssuedToken {
    /// Seconds between issue and expiry.
    pub fn expires_in(&self) -> i64 {
        self.claims.exp - self.claims.iat
    }
}

/// Why a token was rejected (or could not be produced).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("unexpected signing algorithm")]
    InvalidAlgorithm,

    #[error("signature does not verify")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    /// The signature verified but the payload lacks a required claim.
    #[error("missing or invalid claims: {0}")]
    MissingClaims(String),

    #[error("can't sign token: {0}")]
    Signing(String),
}

/// Only the identifier claim, read before the token is trusted.
#[derive(Deserialize)]
struct TokenId {
    jti: String,
}

/// Signs and verifies session tokens with the process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    peek_validation: Validation,
    lifetime_secs: i64,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        let mut peek_validation = Validation::new(TOKEN_ALGORITHM);
        peek_validation.insecure_disable_signature_validation();
        peek_validation.validate_exp = false;
        peek_validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            peek_validation,
            lifetime_secs: config.session_lifetime_secs,
        }
    }

    /// Issue a token for `subject_id`, valid from now for the configured lifetime.
    pub fn issue(&self, subject_id: DbId) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject_id, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(&self, subject_id: DbId, issued_at: i64) -> Result<IssuedToken, TokenError> {
        let claims = SessionClaims {
            sub: subject_id,
            iat: issued_at,
            exp: issued_at + self.lifetime_secs,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify algorithm, signature, and expiry, and return the typed claims.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        // Header problems are format errors, never claim errors.
        decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;

        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)
    }

    /// Read the `jti` claim without verifying anything.
    ///
    /// The result is untrusted; it is only good for a ledger lookup that
    /// happens before [`TokenCodec::validate`].
    pub fn peek_token_id(&self, token: &str) -> Result<String, TokenError> {
        decode::<TokenId>(token, &self.decoding_key, &self.peek_validation)
            .map(|data| data.claims.jti)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidAlgorithm => TokenError::InvalidAlgorithm,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::Json(e) => TokenError::MissingClaims(e.to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            TokenError::MissingClaims(format!("missing `{claim}` claim"))
        }
        _ => TokenError::Malformed(err.to_string()),
    }
}
