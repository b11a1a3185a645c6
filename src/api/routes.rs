//! API route configuration.

use crate::api::handlers::{readiness_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `GET  /health`  - Readiness probe (checks the database)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(readiness_handler))
}
