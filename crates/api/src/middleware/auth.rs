//! Session-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use keystone_auth::AuthenticatedUser;

use crate::error::AppError;
use crate::state::AppState;

/// Raw `Authorization` header value, required to be present.
///
/// Parsing and validation are left to the session service so logout and
/// session checks share one code path.
#[derive(Debug, Clone)]
pub struct BearerHeader(pub String);

impl FromRequestParts<AppState> for BearerHeader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        // A header with non-visible-ASCII bytes cannot be a bearer token.
        let value = value
            .to_str()
            .map_err(|_| AppError::from(keystone_auth::SessionError::MalformedHeader))?;

        Ok(BearerHeader(value.to_string()))
    }
}

/// User behind a valid, unrevoked session token.
///
/// Use this as an extractor parameter in any handler that requires an open
/// session:
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.0.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerHeader(header) = BearerHeader::from_request_parts(parts, state).await?;
        let user = state.sessions.check_session(&header).await?;
        Ok(SessionUser(user))
    }
}
