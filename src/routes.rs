//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect (public)
//! - `GET  /healthz`     - Liveness probe
//! - `/api/*`            - Link management API (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origins for the browser client
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// HTTP-facing settings taken from [`Config`].
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            rate_limit_per_second: 2,
            rate_limit_burst: 100,
        }
    }
}

impl From<&Config> for RouterSettings {
    fn from(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            rate_limit_per_second: config.rate_limit_per_second,
            rate_limit_burst: config.rate_limit_burst,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState, settings: &RouterSettings) -> Router {
    let api_router = api::routes::link_routes().layer(rate_limit::layer(
        settings.rate_limit_per_second,
        settings.rate_limit_burst,
    ));

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors::layer(&settings.allowed_origins))
        .layer(tracing::layer())
}

/// Wraps the router so `/api/links/` and `/api/links` reach the same route.
pub fn normalized(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
