//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check (public)
//! - `/api/*`        - REST API, see [`crate::api::routes`]
//! - everything else - static frontend bundle from `STATIC_DIR`, then
//!   `404 Unknown endpoint`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, the frontend may be served from another origin
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token on write routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, unknown_endpoint};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `config` - decides whether rate limiting is active, whether it trusts
///   proxy headers, whether the testing routes are mounted, and where static
///   files live
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let public = api::routes::public_routes();
    let login = api::routes::login_routes();

    let (public, protected, login) = if config.rate_limit_enabled {
        (
            rate_limit::apply(public, config.behind_proxy),
            rate_limit::apply_secure(protected, config.behind_proxy),
            rate_limit::apply_secure(login, config.behind_proxy),
        )
    } else {
        (public, protected, login)
    };

    let mut api_router = Router::new().merge(public).merge(protected).merge(login);

    if config.app_env.is_test() {
        api_router = api_router.merge(api::routes::testing_routes());
    }

    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(unknown_endpoint.into_service());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback_service(static_files)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
