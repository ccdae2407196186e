//! Dive session domain models.

use chrono::{DateTime, Utc};

/// A logged dive session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DiveSession {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub gps_lat: Option<f64>,
    pub gps_lng: Option<f64>,
    pub water_type: String,
    pub temperature: Option<f64>,
    pub dive_count: i32,
    pub max_depth: f64,
    pub max_dive_time: i32,
    pub notes: Option<String>,
}

/// Field set for creating or replacing a dive session.
#[derive(Debug, Clone)]
pub struct DiveSessionFields {
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub gps_lat: Option<f64>,
    pub gps_lng: Option<f64>,
    pub water_type: String,
    pub temperature: Option<f64>,
    pub dive_count: i32,
    pub max_depth: f64,
    pub max_dive_time: i32,
    pub notes: Option<String>,
}
