use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(jsonwebtoken::errors::Error),
    #[error("Token verification failed: {0}")]
    VerificationFailed(jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies the stateless bearer tokens. There is no revocation
/// list; a token stays valid until its expiry.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            expiration_hours,
        }
    }

    /// Issues a token with the configured lifetime.
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, JwtError> {
        self.issue_for(user_id, username, self.expiration_hours)
    }

    pub fn issue_for(
        &self,
        user_id: Uuid,
        username: &str,
        expires_in_hours: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(expires_in_hours)).timestamp();

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp,
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(JwtError::GenerationFailed)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(JwtError::VerificationFailed)
    }
}
