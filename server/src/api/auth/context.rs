//! Authenticated caller identity

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::jwt::Claims;
use super::middleware::AuthError;

/// Identity of the caller, inserted into request extensions by [`super::require_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.id,
            username: claims.username,
            role: claims.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("AuthContext missing, require_auth not applied to route");
                AuthError::required()
            })
    }
}
