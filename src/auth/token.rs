//! Signed, time limited admin tokens (HS256 JWT).

use chrono::{
    DateTime,
    Duration,
    Utc,
};
use jsonwebtoken::{
    decode,
    encode,
    Algorithm,
    DecodingKey,
    EncodingKey,
    Header,
    Validation,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::app::AuthSettings;
use crate::auth::AuthError;

pub const ADMIN_ROLE: &str = "admin";

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: String,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiration, seconds since the epoch.
    pub exp: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        TokenService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Sign an admin token for `email`, valid from now for the configured
    /// lifetime. Tokens cannot be refreshed.
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            email: email.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    /// Verify the token carried by an `Authorization: Bearer <token>` header
    /// value.
    pub fn verify_header(&self, authorization: Option<&str>) -> Result<Claims, AuthError> {
        let token = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;
        self.verify(token)
    }
}

impl From<&AuthSettings> for TokenService {
    fn from(settings: &AuthSettings) -> Self {
        TokenService::new(&settings.token_secret, Duration::hours(settings.token_ttl_hours))
    }
}
