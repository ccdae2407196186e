//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API-layer DTOs
//! (which carry `#[serde(rename)]` for camelCase etc.).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain user with resolved role names.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Named role from the closed registry.
#[derive(Debug, Clone)]
pub struct Role {
    pub id: String,
    pub name: String,
}

/// Refresh token record stored in the database.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// True iff the stored expiry is in the past relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Username.
    pub username: String,
    /// User email.
    pub email: String,
    /// Role claims (e.g. `["ROLE_USER"]`).
    pub roles: Vec<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn record_with_future_expiry_is_not_expired() {
        let now = Utc::now();
        let record = RefreshTokenRecord {
            id: "t1".into(),
            user_id: "u1".into(),
            expires_at: now + Duration::seconds(60),
        };
        assert!(!record.is_expired(now));
    }

    #[test]
    fn record_with_past_expiry_is_expired() {
        let now = Utc::now();
        let record = RefreshTokenRecord {
            id: "t1".into(),
            user_id: "u1".into(),
            expires_at: now - Duration::seconds(1),
        };
        assert!(record.is_expired(now));
    }
}
