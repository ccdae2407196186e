//! Business logic services sitting between handlers and `divelog_core`.

pub mod auth;
pub mod cookies;
pub mod dive_sessions;
pub mod profiles;
pub mod users;
