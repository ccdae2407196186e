//! Dive session request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::handlers::parse_id;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{DiveSessionRequest, DiveSessionResponse};
use crate::services::dive_sessions;

/// `POST /api/diveSessions/me` — log a new dive session.
pub async fn create_my_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<DiveSessionRequest>,
) -> AppResult<(StatusCode, Json<DiveSessionResponse>)> {
    let resp = dive_sessions::create_my_session(&state.pool, &user.0.sub, body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `GET /api/diveSessions/me` — list the calling user's dive sessions.
pub async fn retrieve_my_sessions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<DiveSessionResponse>>> {
    let resp = dive_sessions::retrieve_my_sessions(&state.pool, &user.0.sub).await?;
    Ok(Json(resp))
}

/// `GET /api/diveSessions/me/{id}` — fetch one owned dive session.
pub async fn retrieve_my_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DiveSessionResponse>> {
    let resp =
        dive_sessions::retrieve_my_session(&state.pool, &user.0.sub, parse_id(&id)?).await?;
    Ok(Json(resp))
}

/// `PUT /api/diveSessions/me/{id}` — replace one owned dive session.
pub async fn update_my_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<DiveSessionRequest>,
) -> AppResult<(StatusCode, Json<DiveSessionResponse>)> {
    let resp =
        dive_sessions::update_my_session(&state.pool, &user.0.sub, parse_id(&id)?, body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `DELETE /api/diveSessions/me/{id}` — delete one owned dive session.
pub async fn delete_my_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    dive_sessions::delete_my_session(&state.pool, &user.0.sub, parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/diveSessions` — list all dive sessions. Admin only.
pub async fn retrieve_sessions_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DiveSessionResponse>>> {
    let resp = dive_sessions::retrieve_sessions(&state.pool).await?;
    Ok(Json(resp))
}

/// `GET /api/diveSessions/{id}` — fetch any dive session. Admin only.
pub async fn retrieve_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiveSessionResponse>> {
    let resp = dive_sessions::retrieve_session(&state.pool, parse_id(&id)?).await?;
    Ok(Json(resp))
}

/// `DELETE /api/diveSessions/{id}` — delete any dive session. Admin
/// only.
pub async fn delete_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    dive_sessions::delete_session(&state.pool, parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
