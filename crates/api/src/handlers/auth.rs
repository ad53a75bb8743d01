//! Handlers for the `/auth` resource (register, login, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use keystone_auth::IssuedToken;
use keystone_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::{BearerHeader, SessionUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub login: String,
    pub password: String,
}

/// Response returned when a session is opened.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    fn new(message: String, issued: IssuedToken) -> Self {
        Self {
            message,
            expires_in: issued.expires_in(),
            access_token: issued.token,
            token_type: "Bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response for `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: DbId,
    pub login: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a user and return a session token for it.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let issued = state.sessions.register(&input.login, &input.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::new("User registered".into(), issued)),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with login + password. Every call opens a new session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let issued = state.sessions.login(&input.login, &input.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::new(
            format!("You are logged in {}", input.login),
            issued,
        )),
    ))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented session token. Repeating the call with the same
/// token succeeds.
pub async fn logout(
    State(state): State<AppState>,
    BearerHeader(header): BearerHeader,
) -> AppResult<Json<MessageResponse>> {
    state.sessions.logout(&header).await?;
    Ok(Json(MessageResponse { message: "Bye!" }))
}

/// GET /api/v1/auth/session
///
/// Report who the presented session token belongs to.
pub async fn session(SessionUser(user): SessionUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        message: format!("You are logged in {}", user.login),
        user_id: user.user_id,
        login: user.login,
    })
}
