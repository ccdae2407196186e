//! HTTP request handlers.

pub mod auth;
pub mod dive_sessions;
pub mod profiles;
pub mod users;

use axum::Json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::MessageResponse;

/// `GET /` — welcome message.
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the dive log API.".into(),
    })
}

/// Validate an `{id}` path segment before it reaches a query.
pub(crate) fn parse_id(id: &str) -> AppResult<&str> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid ID.".into()))?;
    Ok(id)
}
