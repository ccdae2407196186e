//! # divelog_api
//!
//! HTTP API library for the dive log backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, dive_sessions, profiles, users};
use crate::middleware::auth::{require_admin, require_auth};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `divelog_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    divelog_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = match HeaderValue::from_str(&state.config.webapp_url) {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/", get(handlers::welcome))
        .route("/api/auth/signup", axum::routing::post(auth::signup_handler))
        .route("/api/auth/login", axum::routing::post(auth::login_handler))
        .route("/api/auth/accessToken", get(auth::refresh_handler))
        .route("/api/auth/logout", get(auth::logout_handler));

    // Routes requiring a verified access token
    let authenticated = Router::new()
        .route(
            "/api/users/me",
            get(users::retrieve_self_handler).patch(users::update_self_handler),
        )
        .route(
            "/api/userProfiles/me",
            get(profiles::retrieve_self_handler).put(profiles::update_self_handler),
        )
        .route(
            "/api/diveSessions/me",
            axum::routing::post(dive_sessions::create_my_handler)
                .get(dive_sessions::retrieve_my_sessions_handler),
        )
        .route(
            "/api/diveSessions/me/{id}",
            get(dive_sessions::retrieve_my_session_handler)
                .put(dive_sessions::update_my_session_handler)
                .delete(dive_sessions::delete_my_session_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    // Routes additionally requiring the admin role
    let admin = Router::new()
        .route(
            "/api/users",
            axum::routing::post(users::create_users_handler).get(users::retrieve_users_handler),
        )
        .route(
            "/api/users/{id}",
            get(users::retrieve_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .route(
            "/api/diveSessions",
            get(dive_sessions::retrieve_sessions_handler),
        )
        .route(
            "/api/diveSessions/{id}",
            get(dive_sessions::retrieve_session_handler)
                .delete(dive_sessions::delete_session_handler),
        )
        .layer(axum::middleware::from_fn(require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(cors)
        .with_state(state)
}
