//! Authentication middleware

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde_json::json;

use super::context::AuthContext;
use super::jwt::JwtError;
use super::manager::AuthManager;
use crate::core::constants::{JWT_COOKIE_NAME, JWT_QUERY_PARAM};

/// Authentication error response
#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AuthError {
    fn unauthorized(code: &'static str, message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code,
            message: message.to_string(),
        }
    }

    pub fn required() -> Self {
        Self::unauthorized("AUTH_REQUIRED", "cookie token is empty")
    }

    pub fn expired() -> Self {
        Self::unauthorized("TOKEN_EXPIRED", "Token is expired")
    }

    pub fn invalid() -> Self {
        Self::unauthorized("TOKEN_INVALID", "Invalid token")
    }

    pub fn refresh_expired() -> Self {
        Self::unauthorized("TOKEN_REFRESH_EXPIRED", "Token is expired")
    }

    pub fn missing_credentials() -> Self {
        Self::unauthorized("LOGIN_MISSING", "missing Username or Password")
    }

    pub fn failed_authentication() -> Self {
        Self::unauthorized("LOGIN_FAILED", "incorrect Username or Password")
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL",
            message: "Failed to issue token".to_string(),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::Expired => Self::expired(),
            JwtError::RefreshExpired => Self::refresh_expired(),
            JwtError::Signing(_) => Self::internal(),
            JwtError::InvalidSignature | JwtError::Invalid(_) => Self::invalid(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error = if self.status == StatusCode::UNAUTHORIZED {
            "unauthorized"
        } else {
            "internal_error"
        };
        let body = json!({
            "error": error,
            "code": self.code,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Shared auth state for middleware
#[derive(Clone)]
pub struct AuthState {
    pub auth_manager: Arc<AuthManager>,
}

/// Find the caller's token
///
/// Lookup order: `Authorization: Bearer` header, `token` query parameter,
/// `jwt` cookie. The first source present wins, even when empty.
pub fn extract_token(headers: &HeaderMap, uri: &Uri, jar: &CookieJar) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION)
        && let Ok(value) = value.to_str()
        && let Some(token) = value.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    if let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        && let Some((_, token)) = pairs.into_iter().find(|(k, _)| k == JWT_QUERY_PARAM)
    {
        return Some(token);
    }

    jar.get(JWT_COOKIE_NAME).map(|c| c.value().to_string())
}

/// Authentication middleware
///
/// Validates the token and injects [`AuthContext`] into request extensions.
pub async fn require_auth(
    State(state): State<AuthState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token(request.headers(), request.uri(), &jar)
        .filter(|t| !t.is_empty())
        .ok_or_else(AuthError::required)?;

    let claims = state.auth_manager.validate(&token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected token");
        AuthError::from(e)
    })?;

    request.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;

    fn jar_with(token: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(JWT_COOKIE_NAME, token.to_string()))
    }

    #[test]
    fn test_header_wins_over_query_and_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        let uri: Uri = "/WODs?token=from-query".parse().unwrap();

        assert_eq!(
            extract_token(&headers, &uri, &jar_with("from-cookie")).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_query_wins_over_cookie() {
        let uri: Uri = "/WODs?type=Hero&token=from-query".parse().unwrap();
        assert_eq!(
            extract_token(&HeaderMap::new(), &uri, &jar_with("from-cookie")).as_deref(),
            Some("from-query")
        );
    }

    #[test]
    fn test_cookie_fallback() {
        let uri: Uri = "/WODs".parse().unwrap();
        assert_eq!(
            extract_token(&HeaderMap::new(), &uri, &jar_with("from-cookie")).as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_non_bearer_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        let uri: Uri = "/WODs".parse().unwrap();
        assert_eq!(extract_token(&headers, &uri, &CookieJar::new()), None);
    }

    #[test]
    fn test_jwt_error_mapping() {
        assert_eq!(AuthError::from(JwtError::Expired).code, "TOKEN_EXPIRED");
        assert_eq!(
            AuthError::from(JwtError::Invalid("x".into())).code,
            "TOKEN_INVALID"
        );
        assert_eq!(
            AuthError::from(JwtError::Signing("x".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
