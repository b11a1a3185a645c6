//! Handler for short URL redirect.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::extract::ShortCodePath;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}` where `code` matches `^[a-zA-Z0-9]{6}$`
///
/// Returns `302 Found` with a `Location` header. Every request goes to
/// storage; nothing is cached.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error on storage failure.
pub async fn redirect_handler(
    State(state): State<AppState>,
    ShortCodePath(code): ShortCodePath,
) -> Result<Response, AppError> {
    let original_url = state.link_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
}
