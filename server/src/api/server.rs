//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::auth::{AuthManager, AuthState, require_auth};
use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{activities, auth, health, wods};
use crate::core::CoreApp;
use crate::core::constants::{AUTH_BODY_LIMIT, DEFAULT_BODY_LIMIT};
use crate::data::TransactionalService;

/// Assemble the full HTTP router
///
/// WOD and activity routes sit behind [`require_auth`]; login, logout,
/// refresh, health and the API docs are public.
pub fn build_router(
    database: Arc<TransactionalService>,
    auth_manager: Arc<AuthManager>,
    allowed_origins: &AllowedOrigins,
) -> Router {
    let auth_routes = auth::routes(auth_manager.clone(), database.clone())
        .layer(DefaultBodyLimit::max(AUTH_BODY_LIMIT));

    let protected_routes = Router::new()
        .merge(wods::routes(database.clone()))
        .merge(activities::routes(database.clone()))
        .route_layer(axum::middleware::from_fn_with_state(
            AuthState { auth_manager },
            require_auth,
        ));

    Router::new()
        .route("/health", get(health::health))
        .with_state(database)
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui_html))
        .merge(auth_routes)
        .merge(protected_routes)
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);

        let router = build_router(app.database.clone(), app.auth.clone(), &allowed_origins);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            backend = %app.database.backend(),
            "Listening on http://{}",
            addr
        );
        if middleware::is_all_interfaces(&app.config.server.host)
            && let Ok(ip) = local_ip_address::local_ip()
        {
            tracing::info!("Reachable on the network at http://{}:{}", ip, addr.port());
        }

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}
