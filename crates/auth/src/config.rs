//! Authentication configuration.

use std::fmt;

/// Env var holding the HMAC signing secret.
pub const SECRET_VAR: &str = "JWT_SECRET_KEY";
/// Env var holding the password hashing work factor.
pub const WORK_FACTOR_VAR: &str = "HASH_WORK_FACTOR";
/// Env var holding the session token lifetime in seconds.
pub const SESSION_LIFETIME_VAR: &str = "SESSION_LIFETIME_SECS";
/// Env var holding the allowed clock skew when checking expiry.
pub const LEEWAY_VAR: &str = "TOKEN_LEEWAY_SECS";

/// Default Argon2 time cost.
pub const DEFAULT_WORK_FACTOR: u32 = 10;
/// Upper bound on the work factor; beyond this login latency is unacceptable.
pub const MAX_WORK_FACTOR: u32 = 32;
/// Default session lifetime: one hour.
pub const DEFAULT_SESSION_LIFETIME_SECS: i64 = 3600;
/// Minimum login length accepted at registration.
pub const DEFAULT_MIN_LOGIN_LENGTH: usize = 3;
/// Minimum password length accepted at registration.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Startup-time configuration failure. Any of these must stop the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process-wide HMAC secret for session tokens.
///
/// Construction rejects an empty secret. `Debug` never prints the value.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::Empty(SECRET_VAR));
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Configuration for the session subsystem.
///
/// Built once at startup and passed by reference to the components that
/// need it; nothing reads the environment after that.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: SigningSecret,
    /// Argon2 time cost (iterations) for new password hashes.
    pub work_factor: u32,
    pub session_lifetime_secs: i64,
    /// Clock skew tolerated when checking `exp` (default: 0).
    pub leeway_secs: u64,
    /// Minimum login length in UTF-8 bytes.
    pub min_login_length: usize,
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Configuration with defaults for everything except the secret.
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            work_factor: DEFAULT_WORK_FACTOR,
            session_lifetime_secs: DEFAULT_SESSION_LIFETIME_SECS,
            leeway_secs: 0,
            min_login_length: DEFAULT_MIN_LOGIN_LENGTH,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `JWT_SECRET_KEY`        | **yes**  | --      |
    /// | `HASH_WORK_FACTOR`      | no       | `10`    |
    /// | `SESSION_LIFETIME_SECS` | no       | `3600`  |
    /// | `TOKEN_LEEWAY_SECS`     | no       | `0`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AuthConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup(SECRET_VAR).ok_or(ConfigError::Missing(SECRET_VAR))?;
        let mut config = Self::new(SigningSecret::new(secret)?);

        config.work_factor = parse_work_factor(lookup(WORK_FACTOR_VAR).as_deref());

        if let Some(raw) = lookup(SESSION_LIFETIME_VAR) {
            let secs: i64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: SESSION_LIFETIME_VAR,
                reason: format!("{e}"),
            })?;
            if secs <= 0 {
                return Err(ConfigError::Invalid {
                    var: SESSION_LIFETIME_VAR,
                    reason: "must be positive".into(),
                });
            }
            config.session_lifetime_secs = secs;
        }

        if let Some(raw) = lookup(LEEWAY_VAR) {
            config.leeway_secs = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: LEEWAY_VAR,
                reason: format!("{e}"),
            })?;
        }

        Ok(config)
    }
}

/// Parse a work factor, falling back to [`DEFAULT_WORK_FACTOR`] when the value
/// is missing, unparsable, or outside `1..=MAX_WORK_FACTOR`.
pub fn parse_work_factor(raw: Option<&str>) -> u32 {
    match raw.map(|v| v.trim().parse::<u32>()) {
        Some(Ok(factor)) if (1..=MAX_WORK_FACTOR).contains(&factor) => factor,
        Some(_) => {
            tracing::warn!(
                default = DEFAULT_WORK_FACTOR,
                "{WORK_FACTOR_VAR} is invalid, using default"
            );
            DEFAULT_WORK_FACTOR
        }
        None => DEFAULT_WORK_FACTOR,
    }
}
