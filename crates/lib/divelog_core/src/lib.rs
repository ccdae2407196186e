//! # divelog_core
//!
//! Core domain logic for the dive log backend.

pub mod auth;
pub mod dives;
pub mod migrate;
pub mod models;
pub mod profiles;
pub mod roles;
pub mod users;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
