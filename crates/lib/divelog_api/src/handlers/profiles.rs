//! User profile request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ProfileResponse, UpdateProfileRequest};
use crate::services::profiles;

/// `GET /api/userProfiles/me` — fetch the calling user's profile.
pub async fn retrieve_self_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<ProfileResponse>> {
    let resp = profiles::retrieve_self(&state.pool, &user.0.sub).await?;
    Ok(Json(resp))
}

/// `PUT /api/userProfiles/me` — create or update the calling user's
/// profile.
pub async fn update_self_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<(StatusCode, Json<ProfileResponse>)> {
    let resp = profiles::update_self(&state.pool, &user.0.sub, body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
