//! Request and response DTOs.
//!
//! Wire names are camelCase; domain models in `divelog_core` stay
//! snake_case.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Generic message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login body. The refresh token travels only in the cookie, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Role claims, e.g. `["ROLE_USER"]`.
    pub roles: Vec<String>,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// User as returned by the user endpoints; role names are raw (no
/// `ROLE_` prefix).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSelfRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUserEntry {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUsersRequest {
    pub users: Vec<NewUserEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedUsersResponse {
    pub message: String,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// User profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dive sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GpsCoordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiveSessionRequest {
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub gps_coordinates: Option<GpsCoordinates>,
    pub water_type: String,
    pub temperature: Option<f64>,
    pub dive_count: i32,
    pub max_depth: f64,
    pub max_dive_time: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiveSessionResponse {
    pub id: String,
    /// Owning user ID.
    pub user: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub gps_coordinates: Option<GpsCoordinates>,
    pub water_type: String,
    pub temperature: Option<f64>,
    pub dive_count: i32,
    pub max_depth: f64,
    pub max_dive_time: i32,
    pub notes: Option<String>,
}
