//! HS256 bearer tokens.
//!
//! Tokens encode the user id and issue time. They carry no expiry and
//! verification does not demand one; a token stays valid until the signing
//! secret rotates.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stagebook_core::AppError;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub iat: i64,  // issued at timestamp
}

/// Sign a token for the given user.
pub fn issue_token(secret: &str, user_id: Uuid) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        iat: Utc::now().timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Validate and decode a bearer token.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // No expiry claim is issued, so none is required.
    validation.validate_exp = false;
    validation.required_spec_claims = Default::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Token validation failed: {}", e);
        AppError::Unauthorized("Invalid or malformed token".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-min-32-characters-long";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(SECRET, user_id).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(SECRET, Uuid::new_v4()).unwrap();
        let result = verify_token("another-secret-key-of-enough-length!", &token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = issue_token(SECRET, Uuid::new_v4()).unwrap();
        let mut tampered = token;
        tampered.pop();
        tampered.push('A');
        assert!(verify_token(SECRET, &tampered).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token(SECRET, "not-a-token").is_err());
    }
}
