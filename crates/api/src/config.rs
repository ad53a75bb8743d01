use std::str::FromStr;

use keystone_auth::{AuthConfig, ConfigError};

/// Server configuration loaded from environment variables.
///
/// Everything except the signing secret has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://data/users.db`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How often expired revocations are purged (default: `3600`).
    pub revocation_purge_interval_secs: u64,
    /// Session subsystem settings (secret, work factor, token lifetime).
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                    |
    /// |----------------------------------|----------------------------|
    /// | `HOST`                           | `0.0.0.0`                  |
    /// | `PORT`                           | `8080`                     |
    /// | `DATABASE_URL`                   | `sqlite://data/users.db`   |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                       |
    /// | `REVOCATION_PURGE_INTERVAL_SECS` | `3600`                     |
    ///
    /// See [`AuthConfig::from_env`] for the session settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", lookup("PORT"), 8080)?;
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://data/users.db".into());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", lookup("REQUEST_TIMEOUT_SECS"), 30)?;
        let revocation_purge_interval_secs = parse_or(
            "REVOCATION_PURGE_INTERVAL_SECS",
            lookup("REVOCATION_PURGE_INTERVAL_SECS"),
            3600,
        )?;
        if revocation_purge_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "REVOCATION_PURGE_INTERVAL_SECS",
                reason: "must be positive".into(),
            });
        }

        let auth = AuthConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            revocation_purge_interval_secs,
            auth,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
