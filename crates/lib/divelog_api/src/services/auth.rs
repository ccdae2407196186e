//! Authentication service — the session lifecycle lives here.
//!
//! Signup, login, access-token refresh, and logout compose the password
//! hasher, the token codec, the refresh-token store, and the role
//! registry from `divelog_core`. The service keeps no state between
//! calls; every store read is a fresh query.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use divelog_core::auth::{jwt, password, queries, refresh};
use divelog_core::auth::jwt::VerifyError;
use divelog_core::roles;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AccessTokenResponse, LoginResponse, MessageResponse, SignupRequest, UserResponse};

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

pub(crate) fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(3..=20).contains(&len) {
        return Err(AppError::Validation(
            "Username must be between 3 and 20 characters.".into(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::Validation(
            "Username may only contain letters, numbers and underscores.".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> AppResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("Email is not valid.".into()));
    }
    Ok(())
}

pub(crate) fn validate_password(pw: &str) -> AppResult<()> {
    if pw.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters.".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Role resolution
// ---------------------------------------------------------------------------

/// Resolve requested role names to role IDs, defaulting to the base
/// role when none are requested. Unknown names are rejected before any
/// lookup.
pub(crate) async fn resolve_role_ids(
    pool: &PgPool,
    requested: Option<&[String]>,
) -> AppResult<Vec<String>> {
    match requested {
        Some(names) if !names.is_empty() => {
            let unknown: Vec<&str> = names
                .iter()
                .filter(|n| !roles::is_known_role(n))
                .map(|n| n.as_str())
                .collect();
            if !unknown.is_empty() {
                return Err(AppError::Validation(format!(
                    "Failed! Role(s) {} does not exist!",
                    unknown.join(", ")
                )));
            }
            let canonical: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
            let resolved = roles::find_roles_by_names(pool, &canonical).await?;
            Ok(resolved.into_iter().map(|r| r.id).collect())
        }
        _ => {
            let role = roles::find_role_by_name(pool, roles::DEFAULT_ROLE)
                .await?
                .ok_or_else(|| AppError::Internal("role registry is not seeded".into()))?;
            Ok(vec![role.id])
        }
    }
}

// ---------------------------------------------------------------------------
// Session operations
// ---------------------------------------------------------------------------

/// Register a new user. No token is issued; the caller logs in next.
pub async fn signup(pool: &PgPool, req: SignupRequest) -> AppResult<UserResponse> {
    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    // Friendly duplicate messages; the unique indexes remain the source
    // of truth if a concurrent signup slips past these reads.
    if queries::username_exists(pool, &req.username).await? {
        return Err(AppError::Conflict("Failed! Username is already in use!".into()));
    }
    if queries::email_exists(pool, &req.email).await? {
        return Err(AppError::Conflict("Failed! Email is already in use!".into()));
    }

    let role_ids = resolve_role_ids(pool, req.roles.as_deref()).await?;
    let password_hash = password::hash_password(&req.password)?;
    let user_id = queries::create_user(pool, &req.username, &req.email, &password_hash).await?;
    for role_id in &role_ids {
        roles::grant_role(pool, &user_id, role_id).await?;
    }

    let role_names = queries::get_role_names(pool, &user_id).await?;
    info!(username = %req.username, "user registered");

    Ok(UserResponse {
        id: user_id,
        username: req.username,
        email: req.email,
        roles: role_names,
    })
}

/// Authenticate with username + password.
///
/// Returns the login body and the opaque refresh-token value; the
/// handler moves the latter into an HTTP-only cookie. Each call stores
/// a new refresh token, so concurrent sessions stay independent.
pub async fn login(
    pool: &PgPool,
    username: &str,
    plain_password: &str,
    config: &ApiConfig,
) -> AppResult<(LoginResponse, String)> {
    let (user_id, email, password_hash) = queries::find_user_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    if !password::verify_password(plain_password, &password_hash) {
        return Err(AppError::Unauthorized("Invalid Password!".into()));
    }

    let role_names = queries::get_role_names(pool, &user_id).await?;
    let authorities: Vec<String> = role_names.iter().map(|n| roles::role_claim(n)).collect();

    let now = Utc::now();
    let access_token = jwt::issue_access_token(
        &user_id,
        username,
        &email,
        &authorities,
        config.access_token_ttl_secs,
        config.jwt_secret.as_bytes(),
        now,
    )?;

    let refresh_token = refresh::generate_refresh_token();
    let token_hash = refresh::hash_refresh_token(&refresh_token);
    let expires_at = now + Duration::seconds(config.refresh_token_ttl_secs);
    queries::store_refresh_token(pool, &token_hash, &user_id, expires_at).await?;

    info!(username, "login succeeded");

    Ok((
        LoginResponse {
            id: user_id,
            username: username.to_string(),
            email,
            roles: authorities,
            access_token,
        },
        refresh_token,
    ))
}

/// Exchange a refresh token for a new access token.
///
/// The refresh token itself is left unchanged: renewing access tokens
/// never extends the session past the refresh token's original expiry.
/// An expired token is deleted on first use, so a second attempt with
/// the same value reports it as not registered.
pub async fn refresh_access_token(
    pool: &PgPool,
    refresh_token: Option<String>,
    config: &ApiConfig,
) -> AppResult<AccessTokenResponse> {
    let token = refresh_token.ok_or(AppError::MissingRefreshToken)?;
    let token_hash = refresh::hash_refresh_token(&token);

    let record = queries::find_refresh_token(pool, &token_hash)
        .await?
        .ok_or(AppError::RefreshTokenNotRegistered)?;

    let now = Utc::now();
    if record.is_expired(now) {
        queries::delete_refresh_token(pool, &record.id).await?;
        info!(user_id = %record.user_id, "purged expired refresh token");
        return Err(AppError::RefreshTokenExpired);
    }

    let (username, email) = queries::find_user_identity(pool, &record.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
    let role_names = queries::get_role_names(pool, &record.user_id).await?;
    let authorities: Vec<String> = role_names.iter().map(|n| roles::role_claim(n)).collect();

    let access_token = jwt::issue_access_token(
        &record.user_id,
        &username,
        &email,
        &authorities,
        config.access_token_ttl_secs,
        config.jwt_secret.as_bytes(),
        now,
    )?;

    Ok(AccessTokenResponse { access_token })
}

/// End a session. Deleting an already-gone token is fine; logout always
/// reports success.
pub async fn logout(pool: &PgPool, refresh_token: Option<String>) -> AppResult<MessageResponse> {
    if let Some(token) = refresh_token {
        let token_hash = refresh::hash_refresh_token(&token);
        queries::delete_refresh_token_by_hash(pool, &token_hash).await?;
    }
    Ok(MessageResponse {
        message: "Disconnected".into(),
    })
}

/// Verify a bearer access token against the configured secret and the
/// real clock, mapping verification failures to their distinct
/// client-facing errors.
pub fn verify_bearer(token: &str, config: &ApiConfig) -> AppResult<divelog_core::models::auth::TokenClaims> {
    jwt::verify_access_token(token, config.jwt_secret.as_bytes(), Utc::now()).map_err(|e| match e {
        VerifyError::Expired => AppError::Unauthorized("Token has expired!".into()),
        VerifyError::Invalid => AppError::Unauthorized("Invalid token!".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_shape_is_enforced() {
        assert!(validate_username("diver1").is_ok());
        assert!(validate_username("d_1_v_e_r").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("a".repeat(21).as_str()).is_err());
        assert!(validate_username("diver 1").is_err());
        assert!(validate_username("diver-1").is_err());
    }

    #[test]
    fn email_shape_is_enforced() {
        assert!(validate_email("d1@x.com").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("d1@nodot").is_err());
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(validate_password("Secr3t!@").is_ok());
        assert!(validate_password("short").is_err());
    }
}
