//! User administration queries.

use sqlx::PgPool;

use crate::auth::AuthError;
use crate::models::auth::User;

/// Row shape shared by the list and single-user queries: user columns
/// plus an aggregated array of role names.
type UserRow = (String, String, String, Vec<String>);

fn into_user((id, username, email, roles): UserRow) -> User {
    User {
        id,
        username,
        email,
        roles,
    }
}

/// Fetch all users with their role names.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT u.id::text, u.username, u.email, \
                COALESCE(array_agg(r.name) FILTER (WHERE r.name IS NOT NULL), '{}') \
         FROM users u \
         LEFT JOIN user_roles ur ON ur.user_id = u.id \
         LEFT JOIN roles r ON r.id = ur.role_id \
         GROUP BY u.id \
         ORDER BY u.created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(into_user).collect())
}

/// Fetch one user with role names by ID.
pub async fn find_user_with_roles(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT u.id::text, u.username, u.email, \
                COALESCE(array_agg(r.name) FILTER (WHERE r.name IS NOT NULL), '{}') \
         FROM users u \
         LEFT JOIN user_roles ur ON ur.user_id = u.id \
         LEFT JOIN roles r ON r.id = ur.role_id \
         WHERE u.id = $1::uuid \
         GROUP BY u.id",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(into_user))
}

/// Partially update a user's own columns. `None` fields are left
/// unchanged. Returns false when the user does not exist.
pub async fn update_user(
    pool: &PgPool,
    user_id: &str,
    username: Option<&str>,
    email: Option<&str>,
    password_hash: Option<&str>,
) -> Result<bool, AuthError> {
    let result = sqlx::query(
        "UPDATE users SET \
            username = COALESCE($2, username), \
            email = COALESCE($3, email), \
            password_hash = COALESCE($4, password_hash) \
         WHERE id = $1::uuid",
    )
    .bind(user_id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a user. Owned refresh tokens, profile, and dive sessions go
/// with it via ON DELETE CASCADE. Returns false when absent.
pub async fn delete_user(pool: &PgPool, user_id: &str) -> Result<bool, AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1::uuid")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
