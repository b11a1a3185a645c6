//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_code": "aB3xY9" }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed or the URL is empty or not http(s)
/// - 409 if the generated code was taken concurrently
/// - 500 if no free code was found or storage failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state.link_service.shorten(&payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: link.short_code,
        }),
    ))
}
