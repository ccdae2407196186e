//! Router-level tests driven through `tower::ServiceExt::oneshot`.
//!
//! The pool is constructed lazily and never connects: every path
//! exercised here is rejected by validation or middleware before any
//! query runs, so no database is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use divelog_api::{AppState, config::ApiConfig};
use divelog_core::auth::jwt;
use tower::ServiceExt;

const JWT_SECRET: &str = "test-secret";

fn test_state() -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost:5432/divelog_test")
        .expect("lazy pool");
    AppState {
        pool,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "postgres://localhost:5432/divelog_test".into(),
            webapp_url: "http://localhost:8081".into(),
            jwt_secret: JWT_SECRET.into(),
            access_token_ttl_secs: 3600,
            refresh_token_ttl_secs: 60,
        },
    }
}

fn bearer_token(roles: &[&str], issued_at_offset_secs: i64) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    jwt::issue_access_token(
        "11111111-2222-3333-4444-555555555555",
        "diver1",
        "d1@x.com",
        &roles,
        3600,
        JWT_SECRET.as_bytes(),
        Utc::now() + Duration::seconds(issued_at_offset_secs),
    )
    .expect("issue token")
}

async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let app = divelog_api::router(test_state());
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn welcome_route_greets() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Welcome to the dive log API.");
}

#[tokio::test]
async fn protected_route_without_token_is_forbidden() {
    let req = Request::builder()
        .uri("/api/diveSessions/me")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "No token provided!");
}

#[tokio::test]
async fn non_bearer_scheme_is_forbidden() {
    let req = Request::builder()
        .uri("/api/diveSessions/me")
        .header(header::AUTHORIZATION, "Basic ZGl2ZXIxOnB3")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "No token provided!");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let req = Request::builder()
        .uri("/api/diveSessions/me")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid token!");
}

#[tokio::test]
async fn expired_token_is_reported_distinctly() {
    // Issued two hours ago with a one-hour TTL.
    let token = bearer_token(&["ROLE_USER"], -7200);
    let req = Request::builder()
        .uri("/api/diveSessions/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Token has expired!");
}

#[tokio::test]
async fn admin_route_rejects_plain_user() {
    let token = bearer_token(&["ROLE_USER"], 0);
    let req = Request::builder()
        .uri("/api/users")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Require ADMIN Role!");
}

#[tokio::test]
async fn refresh_without_cookie_is_missing_token() {
    let req = Request::builder()
        .uri("/api/auth/accessToken")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "missing_token");
    assert_eq!(json["message"], "Refresh token is required!");
}

#[tokio::test]
async fn logout_without_cookie_still_succeeds() {
    let req = Request::builder()
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Disconnected");
}

#[tokio::test]
async fn signup_rejects_short_username_before_any_query() {
    let body = serde_json::json!({
        "username": "ab",
        "email": "d1@x.com",
        "password": "Secr3t!@"
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn malformed_path_id_is_rejected() {
    let token = bearer_token(&["ROLE_USER"], 0);
    let req = Request::builder()
        .uri("/api/diveSessions/me/not-a-uuid")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid ID.");
}
