//! Role registry.
//!
//! A small closed set of named roles, seeded once at startup. Role names
//! are stored lowercase and matched case-insensitively; access tokens
//! carry them as `ROLE_<NAME>` claims.

use sqlx::PgPool;
use tracing::info;

use crate::auth::AuthError;
use crate::models::auth::Role;

/// Canonical role names.
pub const KNOWN_ROLES: [&str; 2] = ["admin", "user"];

/// Role granted when signup requests none.
pub const DEFAULT_ROLE: &str = "user";

/// Name of the administrator role.
pub const ADMIN_ROLE: &str = "admin";

/// Claim carried by administrator access tokens.
pub const ADMIN_CLAIM: &str = "ROLE_ADMIN";

/// Format a role name as an access-token claim.
pub fn role_claim(name: &str) -> String {
    format!("ROLE_{}", name.to_uppercase())
}

/// True iff `name` is one of the known roles, matched case-insensitively.
pub fn is_known_role(name: &str) -> bool {
    KNOWN_ROLES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

/// Seed the registry with the known roles if it is empty. Idempotent.
pub async fn seed_roles(pool: &PgPool) -> Result<(), AuthError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }
    for name in KNOWN_ROLES {
        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
        info!(role = name, "seeded role");
    }
    Ok(())
}

/// Resolve a role by its canonical name.
pub async fn find_role_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, AuthError> {
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT id::text, name FROM roles WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, name)| Role { id, name }))
}

/// Batch-resolve roles by canonical name, in storage order.
pub async fn find_roles_by_names(
    pool: &PgPool,
    names: &[String],
) -> Result<Vec<Role>, AuthError> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT id::text, name FROM roles WHERE name = ANY($1)",
    )
    .bind(names)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id, name)| Role { id, name }).collect())
}

/// Grant a role to a user. Idempotent per (user, role) pair.
pub async fn grant_role(pool: &PgPool, user_id: &str, role_id: &str) -> Result<(), AuthError> {
    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id) VALUES ($1::uuid, $2::uuid) \
         ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(role_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Replace a user's role set with the given role IDs.
pub async fn replace_roles(
    pool: &PgPool,
    user_id: &str,
    role_ids: &[String],
) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM user_roles WHERE user_id = $1::uuid")
        .bind(user_id)
        .execute(pool)
        .await?;
    for role_id in role_ids {
        grant_role(pool, user_id, role_id).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_claim_is_prefixed_and_uppercased() {
        assert_eq!(role_claim("user"), "ROLE_USER");
        assert_eq!(role_claim("admin"), "ROLE_ADMIN");
    }

    #[test]
    fn admin_claim_matches_formatter() {
        assert_eq!(role_claim(ADMIN_ROLE), ADMIN_CLAIM);
    }

    #[test]
    fn known_roles_match_case_insensitively() {
        assert!(is_known_role("USER"));
        assert!(is_known_role("Admin"));
        assert!(!is_known_role("superuser"));
    }
}
