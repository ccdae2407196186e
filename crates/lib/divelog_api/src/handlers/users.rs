//! User request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::handlers::parse_id;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    CreateUsersRequest, CreatedUsersResponse, MessageResponse, UpdateSelfRequest,
    UpdateUserRequest, UserResponse,
};
use crate::services::users;

/// `GET /api/users/me` — fetch the calling user.
pub async fn retrieve_self_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<UserResponse>> {
    let resp = users::retrieve_self(&state.pool, &user.0.sub).await?;
    Ok(Json(resp))
}

/// `PATCH /api/users/me` — update the calling user's email/password.
pub async fn update_self_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateSelfRequest>,
) -> AppResult<Json<UserResponse>> {
    let resp = users::update_self(&state.pool, &user.0.sub, body).await?;
    Ok(Json(resp))
}

/// `POST /api/users` — batch-create users. Admin only.
pub async fn create_users_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateUsersRequest>,
) -> AppResult<(StatusCode, Json<CreatedUsersResponse>)> {
    let resp = users::create_users(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `GET /api/users` — list all users. Admin only.
pub async fn retrieve_users_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let resp = users::retrieve_users(&state.pool).await?;
    Ok(Json(resp))
}

/// `GET /api/users/{id}` — fetch one user. Admin only.
pub async fn retrieve_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let resp = users::retrieve_user(&state.pool, parse_id(&id)?).await?;
    Ok(Json(resp))
}

/// `PUT /api/users/{id}` — update one user. Admin only.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let resp = users::update_user(&state.pool, parse_id(&id)?, body).await?;
    Ok(Json(resp))
}

/// `DELETE /api/users/{id}` — delete one user. Admin only.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    users::delete_user(&state.pool, parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "User deleted.".into(),
    }))
}
