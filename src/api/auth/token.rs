use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Session token claims. The user id is the only identity claim; the
/// user record is re-fetched on every request, so a deleted account is
/// invalid immediately.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens (HS256)
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token bound to the user id, expiring after the configured TTL
    pub fn sign(&self, user_id: i32) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify signature and expiry, returning the user id
    pub fn verify(&self, token: &str) -> Result<i32, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    #[test]
    fn sign_verify_round_trip() {
        let signer = TokenSigner::new("test-secret", 7);
        let token = signer.sign(42).unwrap();
        assert_eq!(signer.verify(&token).unwrap(), 42);
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = TokenSigner::new("test-secret", -1);
        let token = signer.sign(42).unwrap();
        let err = signer.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let signer = TokenSigner::new("test-secret", 7);
        let other = TokenSigner::new("other-secret", 7);
        let token = other.sign(42).unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let signer = TokenSigner::new("test-secret", 7);
        let mut token = signer.sign(42).unwrap();
        token.push('x');
        assert!(signer.verify(&token).is_err());
    }
}
