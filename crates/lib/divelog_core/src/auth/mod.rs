//! Authentication primitives.
//!
//! Provides password hashing, the access-token codec, refresh-token
//! generation, and the database queries backing the session flows.

pub mod jwt;
pub mod password;
pub mod queries;
pub mod refresh;

use thiserror::Error;

/// Failures inside the auth primitives.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
