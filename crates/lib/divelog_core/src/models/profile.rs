//! User profile domain model.

use chrono::NaiveDate;

/// Per-user profile data, one row per user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}
