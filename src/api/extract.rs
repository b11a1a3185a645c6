//! Request extractors.

use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
};

use crate::utils::code_generator::is_valid_short_code;

/// Path segment that has the exact shape of a short code.
///
/// Paths that do not match `^[a-zA-Z0-9]{6}$` are rejected with a bare
/// `404 Not Found` before the handler runs, so they never reach storage.
#[derive(Debug, Clone)]
pub struct ShortCodePath(pub String);

impl<S> FromRequestParts<S> for ShortCodePath
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(code) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        if is_valid_short_code(&code) {
            Ok(Self(code))
        } else {
            Err(StatusCode::NOT_FOUND)
        }
    }
}
