//! JWT access token handling

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::data::types::UserRow;

/// JWT validation error
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    InvalidSignature,
    /// Token is past the refresh window measured from the original login
    #[error("Token is too old to refresh")]
    RefreshExpired,
    #[error("Failed to sign token: {0}")]
    Signing(String),
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    /// Issue time of the login that started this token chain
    pub orig_iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn new(user: &UserRow, timeout: Duration, orig_iat: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + timeout).timestamp(),
            orig_iat: orig_iat.unwrap_or(now.timestamp()),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

pub fn create_token(signing_key: &[u8], claims: &Claims) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| JwtError::Signing(e.to_string()))
}

/// Validate and decode a token
///
/// With `allow_expired` the signature is still checked but `exp` is not,
/// which is what the refresh endpoint needs.
pub fn decode_token(
    token: &str,
    signing_key: &[u8],
    allow_expired: bool,
) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = !allow_expired;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(signing_key), &validation)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::Invalid(e.to_string()),
        })?;

    Ok(token_data.claims)
}
