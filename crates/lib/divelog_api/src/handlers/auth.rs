//! Authentication request handlers.
//!
//! The refresh token moves exclusively through the `refreshToken`
//! cookie; handlers translate between the cookie jar and the session
//! service.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{
    AccessTokenResponse, LoginRequest, LoginResponse, MessageResponse, SignupRequest, UserResponse,
};
use crate::services::{auth, cookies};

/// `POST /api/auth/signup` — register a new user account.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = auth::signup(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/login` — authenticate with username + password.
///
/// Sets the refresh cookie alongside the JSON body.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let (resp, refresh_token) =
        auth::login(&state.pool, &body.username, &body.password, &state.config).await?;
    let jar = jar.add(cookies::refresh_cookie(
        &refresh_token,
        state.config.refresh_token_ttl_secs,
    ));
    Ok((jar, Json(resp)))
}

/// `GET /api/auth/accessToken` — exchange the refresh cookie for a new
/// access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<AccessTokenResponse>> {
    let token = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string());
    let resp = auth::refresh_access_token(&state.pool, token, &state.config).await?;
    Ok(Json(resp))
}

/// `GET /api/auth/logout` — revoke the refresh token and clear its
/// cookie. Always succeeds.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    let token = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string());
    let resp = auth::logout(&state.pool, token).await?;
    let jar = jar.add(cookies::clear_refresh_cookie());
    Ok((jar, Json(resp)))
}
