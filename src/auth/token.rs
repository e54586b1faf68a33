use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// JWT claims: the embedded user identity plus issue/expiry times
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID the token is bound to
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Issues and verifies signed bearer session tokens.
///
/// Tokens are stateless: validity is determined by the HMAC signature and
/// the embedded expiry alone, no server-side session record exists. The
/// signing secret is injected from configuration so it can be rotated by
/// redeploying with a new value.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl TokenManager {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Issue a new token embedding the given user identity
    pub fn issue(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token and return the embedded user identity.
    ///
    /// No storage access happens here; the access guard performs the
    /// separate user-existence check.
    pub fn verify(&self, token: &str) -> Result<String> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(ApiError::TokenExpired),
                _ => Err(ApiError::InvalidToken),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_the_same_identity() {
        let tokens = TokenManager::new("unit-test-secret", 1);
        let token = tokens.issue("user-123").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "user-123");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let tokens = TokenManager::new("unit-test-secret", 1);
        let other = TokenManager::new("different-secret", 1);
        let token = other.issue("user-123").unwrap();
        assert!(matches!(tokens.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = TokenManager::new("unit-test-secret", 1);
        assert!(matches!(
            tokens.verify("not-a-jwt"),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let tokens = TokenManager::new("unit-test-secret", 1);
        let now = Utc::now();
        let claims = Claims {
            sub: "user-123".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&stale), Err(ApiError::TokenExpired)));
    }
}
