use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

/// HS256 signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl JwtKeys {
    pub fn from_secret(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::from_secret(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Mint a token for `user_id` with the configured lifetime.
    pub fn generate(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.encode(&Claims::new(user_id, self.expiry_hours))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry and return the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;
        if token_data.claims.user_id.is_nil() {
            return Err(JwtError::InvalidToken("nil user_id".to_string()));
        }
        Ok(token_data.claims)
    }
}

/// Who is performing a data-access call.
///
/// Ownership filtering keys off this value and nothing else: a `Principal`
/// only ever reads or writes rows it owns on ownership-bearing resources,
/// while `Internal` is unscoped and sees every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// Identity taken from a verified token.
    Principal(Uuid),
    /// Trusted in-process caller (CLI, jobs, or anonymous HTTP when explicitly allowed).
    Internal,
}

impl Caller {
    pub fn principal(&self) -> Option<Uuid> {
        match self {
            Caller::Principal(id) => Some(*id),
            Caller::Internal => None,
        }
    }
}

impl From<Claims> for Caller {
    fn from(claims: Claims) -> Self {
        Caller::Principal(claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_user_id() {
        let keys = JwtKeys::from_secret("test-secret", 1).unwrap();
        let user_id = Uuid::new_v4();
        let token = keys.generate(user_id).unwrap();
        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(Caller::from(claims), Caller::Principal(user_id));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issuer = JwtKeys::from_secret("one", 1).unwrap();
        let verifier = JwtKeys::from_secret("two", 1).unwrap();
        let token = issuer.generate(Uuid::new_v4()).unwrap();
        assert!(matches!(verifier.validate(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let keys = JwtKeys::from_secret("test-secret", 1).unwrap();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = keys.encode(&claims).unwrap();
        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn rejects_nil_subject() {
        let keys = JwtKeys::from_secret("test-secret", 1).unwrap();
        let token = keys.generate(Uuid::nil()).unwrap();
        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(JwtKeys::from_secret("", 1), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn internal_caller_has_no_principal() {
        assert_eq!(Caller::Internal.principal(), None);
    }
}
