use std::sync::Arc;

use keystone_auth::SessionService;
use keystone_db::SqlStore;

use crate::config::ServerConfig;

/// Session service over the SQLite store, in both store roles.
pub type Sessions = SessionService<SqlStore, SqlStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: keystone_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Register / login / logout / session-check flows.
    pub sessions: Arc<Sessions>,
}

impl AppState {
    /// Wire the session service onto `pool`.
    ///
    /// Fails only if the configured work factor is rejected by the hasher.
    pub fn new(
        pool: keystone_db::DbPool,
        config: ServerConfig,
    ) -> Result<Self, keystone_auth::password::HashingError> {
        let store = SqlStore::new(pool.clone());
        let sessions = SessionService::new(store.clone(), store, &config.auth)?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            sessions: Arc::new(sessions),
        })
    }
}
