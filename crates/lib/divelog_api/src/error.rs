//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// The refresh-token variants are deliberately separate so that "no
/// token", "unknown token", and "expired token" stay distinguishable:
/// each drives a different client recovery action.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Refresh token is required!")]
    MissingRefreshToken,

    #[error("Refresh token is not registered!")]
    RefreshTokenNotRegistered,

    #[error("Refresh token was expired. Please make a new login request.")]
    RefreshTokenExpired,

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::MissingRefreshToken => (StatusCode::FORBIDDEN, "missing_token"),
            AppError::RefreshTokenNotRegistered => (StatusCode::FORBIDDEN, "token_not_registered"),
            AppError::RefreshTokenExpired => (StatusCode::FORBIDDEN, "token_expired"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let message = match &self {
            // Store and signing failures stay out of client responses.
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Failed! Username or email is already in use!".into())
            }
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<divelog_core::auth::AuthError> for AppError {
    fn from(e: divelog_core::auth::AuthError) -> Self {
        use divelog_core::auth::AuthError;
        match e {
            AuthError::Token(msg) => AppError::Unauthorized(msg),
            AuthError::Db(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_classes() {
        let cases = [
            (AppError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (AppError::MissingRefreshToken, StatusCode::FORBIDDEN),
            (AppError::RefreshTokenNotRegistered, StatusCode::FORBIDDEN),
            (AppError::RefreshTokenExpired, StatusCode::FORBIDDEN),
            (
                AppError::Internal("i".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = AppError::Internal("connection string with password".into());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn refresh_variants_have_distinct_messages() {
        let missing = AppError::MissingRefreshToken.to_string();
        let unknown = AppError::RefreshTokenNotRegistered.to_string();
        let expired = AppError::RefreshTokenExpired.to_string();
        assert_ne!(missing, unknown);
        assert_ne!(unknown, expired);
        assert_ne!(missing, expired);
    }
}
