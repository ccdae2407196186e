//! Dive session queries.
//!
//! The `*_owned` variants scope every read and write to the owning user,
//! so a caller can never touch another user's log records.

use sqlx::PgPool;

use crate::auth::AuthError;
use crate::models::dive::{DiveSession, DiveSessionFields};
use crate::uuid::uuidv7;

const DIVE_COLUMNS: &str = "id::text, user_id::text, date, location, gps_lat, gps_lng, \
     water_type, temperature, dive_count, max_depth, max_dive_time, notes";

/// Insert a new dive session for a user.
pub async fn create_dive_session(
    pool: &PgPool,
    user_id: &str,
    fields: &DiveSessionFields,
) -> Result<DiveSession, AuthError> {
    let row = sqlx::query_as::<_, DiveSession>(&format!(
        "INSERT INTO dive_sessions \
            (id, user_id, date, location, gps_lat, gps_lng, water_type, \
             temperature, dive_count, max_depth, max_dive_time, notes) \
         VALUES ($1, $2::uuid, COALESCE($3, now()), $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {DIVE_COLUMNS}"
    ))
    .bind(uuidv7())
    .bind(user_id)
    .bind(fields.date)
    .bind(fields.location.as_deref())
    .bind(fields.gps_lat)
    .bind(fields.gps_lng)
    .bind(&fields.water_type)
    .bind(fields.temperature)
    .bind(fields.dive_count)
    .bind(fields.max_depth)
    .bind(fields.max_dive_time)
    .bind(fields.notes.as_deref())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Fetch all dive sessions owned by a user.
pub async fn list_dive_sessions_owned(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<DiveSession>, AuthError> {
    let rows = sqlx::query_as::<_, DiveSession>(&format!(
        "SELECT {DIVE_COLUMNS} FROM dive_sessions WHERE user_id = $1::uuid ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch one dive session owned by a user.
pub async fn find_dive_session_owned(
    pool: &PgPool,
    id: &str,
    user_id: &str,
) -> Result<Option<DiveSession>, AuthError> {
    let row = sqlx::query_as::<_, DiveSession>(&format!(
        "SELECT {DIVE_COLUMNS} FROM dive_sessions WHERE id = $1::uuid AND user_id = $2::uuid"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Replace a dive session owned by a user. Returns the updated row, or
/// `None` when no matching record exists.
pub async fn update_dive_session_owned(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    fields: &DiveSessionFields,
) -> Result<Option<DiveSession>, AuthError> {
    let row = sqlx::query_as::<_, DiveSession>(&format!(
        "UPDATE dive_sessions SET \
            date = COALESCE($3, date), \
            location = $4, \
            gps_lat = $5, \
            gps_lng = $6, \
            water_type = $7, \
            temperature = $8, \
            dive_count = $9, \
            max_depth = $10, \
            max_dive_time = $11, \
            notes = $12 \
         WHERE id = $1::uuid AND user_id = $2::uuid \
         RETURNING {DIVE_COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .bind(fields.date)
    .bind(fields.location.as_deref())
    .bind(fields.gps_lat)
    .bind(fields.gps_lng)
    .bind(&fields.water_type)
    .bind(fields.temperature)
    .bind(fields.dive_count)
    .bind(fields.max_depth)
    .bind(fields.max_dive_time)
    .bind(fields.notes.as_deref())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a dive session owned by a user. Returns false when absent.
pub async fn delete_dive_session_owned(
    pool: &PgPool,
    id: &str,
    user_id: &str,
) -> Result<bool, AuthError> {
    let result = sqlx::query("DELETE FROM dive_sessions WHERE id = $1::uuid AND user_id = $2::uuid")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Fetch all dive sessions across users (admin).
pub async fn list_dive_sessions(pool: &PgPool) -> Result<Vec<DiveSession>, AuthError> {
    let rows = sqlx::query_as::<_, DiveSession>(&format!(
        "SELECT {DIVE_COLUMNS} FROM dive_sessions ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch one dive session by ID regardless of owner (admin).
pub async fn find_dive_session(
    pool: &PgPool,
    id: &str,
) -> Result<Option<DiveSession>, AuthError> {
    let row = sqlx::query_as::<_, DiveSession>(&format!(
        "SELECT {DIVE_COLUMNS} FROM dive_sessions WHERE id = $1::uuid"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a dive session by ID regardless of owner (admin). Returns
/// false when absent.
pub async fn delete_dive_session(pool: &PgPool, id: &str) -> Result<bool, AuthError> {
    let result = sqlx::query("DELETE FROM dive_sessions WHERE id = $1::uuid")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
