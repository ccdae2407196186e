//! User profile queries.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::auth::AuthError;
use crate::models::profile::UserProfile;

const PROFILE_COLUMNS: &str =
    "id::text, user_id::text, gender, birthdate, first_name, last_name, weight, height";

/// Fetch the profile owned by a user.
pub async fn find_profile_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<UserProfile>, AuthError> {
    let row = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1::uuid"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create or partially update a user's profile. `None` fields keep their
/// stored value.
#[allow(clippy::too_many_arguments)]
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: &str,
    gender: Option<&str>,
    birthdate: Option<NaiveDate>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    weight: Option<f64>,
    height: Option<f64>,
) -> Result<UserProfile, AuthError> {
    let row = sqlx::query_as::<_, UserProfile>(&format!(
        "INSERT INTO user_profiles \
            (user_id, gender, birthdate, first_name, last_name, weight, height) \
         VALUES ($1::uuid, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (user_id) DO UPDATE SET \
            gender = COALESCE($2, user_profiles.gender), \
            birthdate = COALESCE($3, user_profiles.birthdate), \
            first_name = COALESCE($4, user_profiles.first_name), \
            last_name = COALESCE($5, user_profiles.last_name), \
            weight = COALESCE($6, user_profiles.weight), \
            height = COALESCE($7, user_profiles.height) \
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(user_id)
    .bind(gender)
    .bind(birthdate)
    .bind(first_name)
    .bind(last_name)
    .bind(weight)
    .bind(height)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
