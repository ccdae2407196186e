//! User management service.

use sqlx::PgPool;
use tracing::info;

use divelog_core::auth::{password, queries};
use divelog_core::roles;
use divelog_core::users;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateUsersRequest, CreatedUsersResponse, NewUserEntry, UpdateSelfRequest, UpdateUserRequest,
    UserResponse,
};
use crate::services::auth::{resolve_role_ids, validate_email, validate_password, validate_username};

/// Password assigned to batch-created users that come without one.
const DEFAULT_BATCH_PASSWORD: &str = "Password";

fn to_response(user: divelog_core::models::auth::User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        roles: user.roles,
    }
}

/// Fetch the calling user.
pub async fn retrieve_self(pool: &PgPool, user_id: &str) -> AppResult<UserResponse> {
    let user = users::find_user_with_roles(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
    Ok(to_response(user))
}

/// Update the calling user's email and/or password.
pub async fn update_self(
    pool: &PgPool,
    user_id: &str,
    req: UpdateSelfRequest,
) -> AppResult<UserResponse> {
    if let Some(email) = req.email.as_deref() {
        validate_email(email)?;
    }
    let password_hash = match req.password.as_deref() {
        Some(pw) => {
            validate_password(pw)?;
            Some(password::hash_password(pw)?)
        }
        None => None,
    };

    let updated = users::update_user(
        pool,
        user_id,
        None,
        req.email.as_deref(),
        password_hash.as_deref(),
    )
    .await?;
    if !updated {
        return Err(AppError::NotFound("User not found.".into()));
    }
    retrieve_self(pool, user_id).await
}

/// Create a batch of users (admin).
pub async fn create_users(pool: &PgPool, req: CreateUsersRequest) -> AppResult<CreatedUsersResponse> {
    if req.users.is_empty() {
        return Err(AppError::Validation("No users provided!".into()));
    }

    let mut created = Vec::with_capacity(req.users.len());
    for entry in req.users {
        created.push(create_one(pool, entry).await?);
    }

    info!(count = created.len(), "users registered by admin");
    Ok(CreatedUsersResponse {
        message: "Users registered successfully!".into(),
        users: created,
    })
}

async fn create_one(pool: &PgPool, entry: NewUserEntry) -> AppResult<UserResponse> {
    validate_username(&entry.username)?;
    validate_email(&entry.email)?;
    let plain = entry.password.as_deref().unwrap_or(DEFAULT_BATCH_PASSWORD);
    validate_password(plain)?;

    if queries::username_exists(pool, &entry.username).await? {
        return Err(AppError::Conflict("Failed! Username is already in use!".into()));
    }
    if queries::email_exists(pool, &entry.email).await? {
        return Err(AppError::Conflict("Failed! Email is already in use!".into()));
    }

    let role_ids = resolve_role_ids(pool, entry.roles.as_deref()).await?;
    let password_hash = password::hash_password(plain)?;
    let user_id = queries::create_user(pool, &entry.username, &entry.email, &password_hash).await?;
    for role_id in &role_ids {
        roles::grant_role(pool, &user_id, role_id).await?;
    }

    let role_names = queries::get_role_names(pool, &user_id).await?;
    Ok(UserResponse {
        id: user_id,
        username: entry.username,
        email: entry.email,
        roles: role_names,
    })
}

/// Fetch all users (admin).
pub async fn retrieve_users(pool: &PgPool) -> AppResult<Vec<UserResponse>> {
    let users = users::list_users(pool).await?;
    Ok(users.into_iter().map(to_response).collect())
}

/// Fetch one user by ID (admin).
pub async fn retrieve_user(pool: &PgPool, user_id: &str) -> AppResult<UserResponse> {
    let user = users::find_user_with_roles(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
    Ok(to_response(user))
}

/// Partially update a user (admin). A provided role list replaces the
/// existing role set.
pub async fn update_user(
    pool: &PgPool,
    user_id: &str,
    req: UpdateUserRequest,
) -> AppResult<UserResponse> {
    if let Some(username) = req.username.as_deref() {
        validate_username(username)?;
    }
    if let Some(email) = req.email.as_deref() {
        validate_email(email)?;
    }
    let password_hash = match req.password.as_deref() {
        Some(pw) => {
            validate_password(pw)?;
            Some(password::hash_password(pw)?)
        }
        None => None,
    };

    let updated = users::update_user(
        pool,
        user_id,
        req.username.as_deref(),
        req.email.as_deref(),
        password_hash.as_deref(),
    )
    .await?;
    if !updated {
        return Err(AppError::NotFound("User not found.".into()));
    }

    if let Some(role_names) = req.roles.as_deref() {
        let role_ids = resolve_role_ids(pool, Some(role_names)).await?;
        roles::replace_roles(pool, user_id, &role_ids).await?;
    }

    retrieve_user(pool, user_id).await
}

/// Delete a user (admin).
pub async fn delete_user(pool: &PgPool, user_id: &str) -> AppResult<()> {
    if !users::delete_user(pool, user_id).await? {
        return Err(AppError::NotFound("User not found.".into()));
    }
    info!(user_id, "user deleted");
    Ok(())
}
