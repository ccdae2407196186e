//! Access token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying identity and role claims. The clock is
//! passed in explicitly so expiry behavior is testable without sleeping.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Why a token failed verification. Callers surface different messages
/// for each: an expired token means re-authenticate, an invalid one is
/// rejected outright.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Token has expired!")]
    Expired,

    #[error("Invalid token!")]
    Invalid,
}

/// Issue a signed access token with `exp = now + ttl_secs`.
pub fn issue_access_token(
    user_id: &str,
    username: &str,
    email: &str,
    roles: &[String],
    ttl_secs: i64,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        roles: roles.to_vec(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Token(format!("jwt encode: {e}")))
}

/// Verify an access token, returning the claims on success.
///
/// Signature and structure are checked by `jsonwebtoken`; expiry is
/// checked against the supplied `now` so a token with a valid signature
/// but a past `exp` is reported as [`VerifyError::Expired`] rather than
/// [`VerifyError::Invalid`].
pub fn verify_access_token(
    token: &str,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<TokenClaims, VerifyError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let claims = decode::<TokenClaims>(token, &key, &validation)
        .map_err(|_| VerifyError::Invalid)?
        .claims;

    if now.timestamp() >= claims.exp {
        return Err(VerifyError::Expired);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn issue(now: DateTime<Utc>, ttl_secs: i64) -> String {
        issue_access_token(
            "u1",
            "diver1",
            "d1@x.com",
            &["ROLE_USER".to_string()],
            ttl_secs,
            SECRET,
            now,
        )
        .expect("issue")
    }

    #[test]
    fn token_has_three_segments() {
        let token = issue(Utc::now(), 3600);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn round_trip_returns_input_claims() {
        let now = Utc::now();
        let token = issue(now, 3600);
        let claims = verify_access_token(&token, SECRET, now).expect("verify");
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.username, "diver1");
        assert_eq!(claims.email, "d1@x.com");
        assert_eq!(claims.roles, vec!["ROLE_USER".to_string()]);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn token_expires_after_ttl() {
        let now = Utc::now();
        let token = issue(now, 3600);
        let later = now + Duration::seconds(3601);
        let err = verify_access_token(&token, SECRET, later).unwrap_err();
        assert_eq!(err, VerifyError::Expired);
    }

    #[test]
    fn token_is_expired_exactly_at_exp() {
        let now = Utc::now();
        let token = issue(now, 3600);
        let at_exp = now + Duration::seconds(3600);
        let err = verify_access_token(&token, SECRET, at_exp).unwrap_err();
        assert_eq!(err, VerifyError::Expired);
    }

    #[test]
    fn wrong_secret_is_invalid_not_expired() {
        let now = Utc::now();
        let token = issue(now, 3600);
        let err = verify_access_token(&token, b"other-secret", now).unwrap_err();
        assert_eq!(err, VerifyError::Invalid);
    }

    #[test]
    fn garbage_is_invalid() {
        let err = verify_access_token("not.a.token", SECRET, Utc::now()).unwrap_err();
        assert_eq!(err, VerifyError::Invalid);
    }

    #[test]
    fn expired_token_with_bad_signature_is_invalid() {
        // Signature failure wins over expiry: a forged token must not
        // reveal whether its claims were otherwise plausible.
        let now = Utc::now();
        let token = issue(now - Duration::seconds(7200), 3600);
        let err = verify_access_token(&token, b"other-secret", now).unwrap_err();
        assert_eq!(err, VerifyError::Invalid);
    }
}
