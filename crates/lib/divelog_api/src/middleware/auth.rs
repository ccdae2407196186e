//! Authentication middleware — Bearer token extraction and role gating.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use divelog_core::models::auth::TokenClaims;
use divelog_core::roles;

use crate::AppState;
use crate::error::AppError;
use crate::services::auth::verify_bearer;

/// Verified claims stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Extracts `Authorization: Bearer <token>`, verifies the JWT, and
/// injects [`AuthenticatedUser`] into request extensions.
///
/// Missing, invalid, and expired tokens each get their own message —
/// they drive different client recovery actions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Forbidden("No token provided!".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Forbidden("No token provided!".into()))?;

    let claims = verify_bearer(token, &state.config)?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}

/// Rejects requests whose verified claims lack the admin role. Must run
/// after [`require_auth`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Forbidden("No token provided!".into()))?;

    if !user.0.roles.iter().any(|r| r == roles::ADMIN_CLAIM) {
        return Err(AppError::Forbidden("Require ADMIN Role!".into()));
    }

    Ok(next.run(request).await)
}
