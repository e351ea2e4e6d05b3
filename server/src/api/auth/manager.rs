//! Authentication manager

use chrono::{DateTime, Duration, Utc};

use super::jwt::{Claims, JwtError, create_token, decode_token};
use crate::core::config::AuthConfig;
use crate::data::types::UserRow;
use crate::utils::crypto;
use crate::utils::time::unix_now;

/// Freshly signed token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expire: DateTime<Utc>,
}

/// Issues, validates and refreshes access tokens
#[derive(Debug)]
pub struct AuthManager {
    signing_key: Vec<u8>,
    timeout: Duration,
    max_refresh: Duration,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let signing_key = match config.secret.as_deref() {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                tracing::warn!("No JWT secret configured, tokens will not survive a restart");
                crypto::generate_signing_key()
            }
        };

        Self {
            signing_key,
            timeout: Duration::minutes(config.timeout_minutes),
            max_refresh: Duration::minutes(config.max_refresh_minutes),
        }
    }

    /// Sign a new token for a user who just logged in
    pub fn issue(&self, user: &UserRow) -> Result<IssuedToken, JwtError> {
        self.sign(Claims::new(user, self.timeout, None))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        decode_token(token, &self.signing_key, false)
    }

    /// Exchange a (possibly expired) token for a new one
    ///
    /// Allowed while the original login is within the max refresh window.
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, JwtError> {
        let claims = decode_token(token, &self.signing_key, true)?;
        let now = unix_now();
        if now - claims.orig_iat > self.max_refresh.num_seconds() {
            return Err(JwtError::RefreshExpired);
        }

        let user = UserRow {
            id: claims.id,
            username: claims.username,
            password_hash: String::new(),
            role: claims.role,
        };
        self.sign(Claims::new(&user, self.timeout, Some(claims.orig_iat)))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn sign(&self, claims: Claims) -> Result<IssuedToken, JwtError> {
        let expire = claims.expires_at();
        let token = create_token(&self.signing_key, &claims)?;
        Ok(IssuedToken { token, expire })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRow {
        UserRow {
            id: 3,
            username: "alex".to_string(),
            password_hash: String::new(),
            role: "user".to_string(),
        }
    }

    fn manager(max_refresh_minutes: i64) -> AuthManager {
        AuthManager::new(&AuthConfig {
            secret: Some("test-secret".to_string()),
            timeout_minutes: 60,
            max_refresh_minutes,
        })
    }

    #[test]
    fn test_issue_then_validate() {
        let manager = manager(60);
        let issued = manager.issue(&user()).unwrap();
        let claims = manager.validate(&issued.token).unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.username, "alex");
        assert!(issued.expire > Utc::now());
    }

    #[test]
    fn test_refresh_keeps_identity_and_orig_iat() {
        let manager = manager(60);
        let issued = manager.issue(&user()).unwrap();
        let first = manager.validate(&issued.token).unwrap();

        let refreshed = manager.refresh(&issued.token).unwrap();
        let second = manager.validate(&refreshed.token).unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.orig_iat, first.orig_iat);
        assert_ne!(second.jti, first.jti);
    }

    #[test]
    fn test_refresh_outside_window_fails() {
        let manager = manager(60);
        let mut claims = Claims::new(&user(), manager.timeout(), None);
        claims.orig_iat -= 2 * 60 * 60;
        let token = create_token(b"test-secret", &claims).unwrap();

        assert!(matches!(
            manager.refresh(&token),
            Err(JwtError::RefreshExpired)
        ));
    }

    #[test]
    fn test_tokens_from_other_secret_rejected() {
        let other = AuthManager::new(&AuthConfig::default());
        let issued = other.issue(&user()).unwrap();
        assert!(manager(60).validate(&issued.token).is_err());
    }
}
