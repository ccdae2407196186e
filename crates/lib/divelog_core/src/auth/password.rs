//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// A malformed digest simply fails verification.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password() {
        let digest = hash_password("Secr3t!@").expect("hash");
        assert!(verify_password("Secr3t!@", &digest));
    }

    #[test]
    fn hash_is_never_the_plaintext() {
        let digest = hash_password("Secr3t!@").expect("hash");
        assert_ne!(digest, "Secr3t!@");
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Secr3t!@").expect("hash");
        let b = hash_password("Secr3t!@").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_password_fails() {
        let digest = hash_password("Secr3t!@").expect("hash");
        assert!(!verify_password("wrong", &digest));
    }

    #[test]
    fn malformed_digest_fails_verification() {
        assert!(!verify_password("Secr3t!@", "not-a-bcrypt-digest"));
    }
}
