pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
///
/// ```text
/// /auth  -> register, login, logout, session
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/auth", auth::router())
}
