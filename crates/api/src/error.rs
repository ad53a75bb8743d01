use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keystone_auth::SessionError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`SessionError`] for the session flows and adds the one rejection
/// the HTTP layer makes on its own (no credentials at all). Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An error from one of the session flows.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The request carried no credentials at all.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Session(err) => classify_session_error(err),

            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a session error into an HTTP status, error code, and message.
///
/// Infrastructure failures are logged and rendered with a sanitized message.
fn classify_session_error(err: &SessionError) -> (StatusCode, &'static str, String) {
    match err {
        SessionError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        SessionError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        SessionError::InvalidCredential => (
            StatusCode::FORBIDDEN,
            "INVALID_CREDENTIAL",
            "Invalid password".to_string(),
        ),
        SessionError::MalformedHeader => (
            StatusCode::UNAUTHORIZED,
            "MALFORMED_HEADER",
            "Authorization header must be Bearer <token>".to_string(),
        ),
        SessionError::UnknownToken(reason) => {
            tracing::debug!(%reason, "Rejected session token");
            (
                StatusCode::FORBIDDEN,
                "UNKNOWN_TOKEN",
                "Unknown token".to_string(),
            )
        }
        SessionError::TokenRevoked => (
            StatusCode::NOT_ACCEPTABLE,
            "TOKEN_REVOKED",
            "Your session token has been revoked".to_string(),
        ),
        SessionError::InvalidClaims(reason) => {
            tracing::error!(%reason, "Verified token with unusable claims");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_CLAIMS",
                "Invalid token claims".to_string(),
            )
        }
        SessionError::StoreFailure(_)
        | SessionError::HashingFailure(_)
        | SessionError::SigningFailure(_) => {
            tracing::error!(error = %err, "Session flow failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
