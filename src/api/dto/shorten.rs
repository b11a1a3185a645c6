//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. A missing field is treated as empty.
    #[serde(default)]
    #[validate(length(min = 1, message = "URL cannot be empty"))]
    pub url: String,
}

/// Response carrying the newly created short code.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
}
