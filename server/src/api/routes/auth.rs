//! Authentication API endpoints

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::auth::{AuthError, AuthManager, IssuedToken, extract_token};
use crate::core::constants::JWT_COOKIE_NAME;
use crate::data::TransactionalService;
use crate::utils::crypto;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Signed token and its expiry
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub code: u16,
    pub token: String,
    pub expire: DateTime<Utc>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            code: 200,
            token: issued.token,
            expire: issued.expire,
        }
    }
}

/// Auth routes state
#[derive(Clone)]
pub struct AuthRoutesState {
    pub auth_manager: Arc<AuthManager>,
    pub database: Arc<TransactionalService>,
}

/// Create auth routes
pub fn routes(auth_manager: Arc<AuthManager>, database: Arc<TransactionalService>) -> Router {
    let state = AuthRoutesState {
        auth_manager,
        database,
    };

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh_token", get(refresh_token))
        .with_state(state)
}

fn token_cookie(state: &AuthRoutesState, token: String) -> Cookie<'static> {
    Cookie::build((JWT_COOKIE_NAME, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(
            state.auth_manager.timeout().num_seconds(),
        ))
        .build()
}

/// Exchange username and password for a token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Missing or incorrect credentials")
    )
)]
pub async fn login(
    State(state): State<AuthRoutesState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let Ok(Json(request)) = body else {
        return Err(AuthError::missing_credentials());
    };
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(AuthError::missing_credentials());
    };
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::missing_credentials());
    }

    let user = match state
        .database
        .repository()
        .get_user_by_username(&username)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(%username, "Login for unknown user");
            return Err(AuthError::failed_authentication());
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching user");
            return Err(AuthError::failed_authentication());
        }
    };

    let stored_hash = user.password_hash.clone();
    let verified =
        tokio::task::spawn_blocking(move || crypto::verify_password(&password, &stored_hash))
            .await
            .unwrap_or(false);
    if !verified {
        tracing::debug!(%username, "Login with wrong password");
        return Err(AuthError::failed_authentication());
    }

    let issued = state.auth_manager.issue(&user).map_err(AuthError::from)?;
    tracing::info!(user_id = user.id, "User logged in");

    let cookie = token_cookie(&state, issued.token.clone());
    Ok((jar.add(cookie), Json(issued.into())))
}

/// Logout - clear token cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out successfully")
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let cookie = Cookie::build((JWT_COOKIE_NAME, ""))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();

    (
        jar.remove(cookie),
        Json(serde_json::json!({ "code": 200 })),
    )
}

/// Issue a fresh token for a current or recently expired one
#[utoipa::path(
    get,
    path = "/refresh_token",
    tag = "auth",
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Token missing, invalid or past the refresh window")
    ),
    security(("bearer" = []))
)]
pub async fn refresh_token(
    State(state): State<AuthRoutesState>,
    headers: HeaderMap,
    uri: Uri,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let token = extract_token(&headers, &uri, &jar)
        .filter(|t| !t.is_empty())
        .ok_or_else(AuthError::required)?;

    let issued = state.auth_manager.refresh(&token)?;
    let cookie = token_cookie(&state, issued.token.clone());
    Ok((jar.add(cookie), Json(issued.into())))
}
