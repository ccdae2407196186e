//! Refresh token generation and storage form.
//!
//! The client-facing value is an opaque UUIDv4 string; only its SHA-256
//! hex digest is persisted, so a leaked database dump cannot be replayed.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a new opaque refresh token value.
pub fn generate_refresh_token() -> String {
    Uuid::new_v4().to_string()
}

/// SHA-256 hash a refresh token for storage.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_uuid_shaped() {
        let token = generate_refresh_token();
        assert!(Uuid::parse_str(&token).is_ok());
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_refresh_token(), generate_refresh_token());
    }

    #[test]
    fn digest_is_hex_sha256() {
        let digest = hash_refresh_token("some-token");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(hash_refresh_token("abc"), hash_refresh_token("abc"));
        assert_ne!(hash_refresh_token("abc"), hash_refresh_token("abd"));
    }
}
