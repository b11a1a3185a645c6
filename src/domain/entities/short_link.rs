//! Short link entity representing a persisted URL mapping.

use chrono::{DateTime, Utc};

/// A persisted mapping between an original URL and its short code.
///
/// Rows are never updated or deleted once inserted, so a `ShortLink` read
/// back from storage is always identical to the one returned at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
}
