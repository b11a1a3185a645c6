//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`        - Short link redirect (code must match `[a-zA-Z0-9]{6}`)
//! - `GET  /health`        - Liveness probe, always `200 OK`
//! - `POST /api/shorten`   - Create a short link
//! - `GET  /api/health`    - Readiness probe (database round-trip)
//! - `/static/*`           - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the routes and middleware without path normalization.
///
/// Integration tests drive this router directly.
pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed
/// before routing.
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir))
}
