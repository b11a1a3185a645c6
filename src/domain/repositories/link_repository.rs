//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use async_trait::async_trait;

/// Errors raised by a [`LinkRepository`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The insert hit the uniqueness constraint on `short_code`.
    #[error("unique constraint violation on {constraint}")]
    UniqueViolation { constraint: String },

    /// Any other backend fault: connectivity, query failure, decoding.
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Repository interface over the single `urls` table.
///
/// Every call round-trips to the backing store; there is no caching layer.
/// Uniqueness of `short_code` is enforced by the store itself, independent of
/// whatever pre-checks a caller performs through [`LinkRepository::exists`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns `true` iff a link with this short code is currently persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] on database errors.
    async fn exists(&self, short_code: &str) -> Result<bool, StorageError>;

    /// Persists a new link and returns it with the store-assigned `id` and
    /// `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UniqueViolation`] if the short code is already
    /// taken, [`StorageError::Backend`] on any other database error.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StorageError>;

    /// Finds the original URL for an exact short code match.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] on database errors.
    async fn lookup(&self, short_code: &str) -> Result<Option<String>, StorageError>;

    /// Performs a trivial round-trip to verify the store is reachable.
    async fn ping(&self) -> Result<(), StorageError>;
}
