//! Link shortening and resolution service.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StorageError};
use crate::utils::code_generator::{CodeGenerator, is_reserved_code};

/// Maximum number of candidate codes tried before giving up.
pub const MAX_ATTEMPTS: usize = 5;

/// Failure kinds of the shortening and redirect operations.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    /// Bad input. Raised before any code is generated or storage is touched.
    #[error("{0}")]
    Validation(String),

    /// Every candidate code was already taken.
    #[error("no free short code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// Another request inserted the same code between our check and insert.
    #[error("short code {code} was taken concurrently")]
    Collision { code: String },

    /// The backing store failed.
    #[error("storage failure during {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    /// No link exists for the requested code.
    #[error("short code {code} not found")]
    NotFound { code: String },
}

impl ShortenError {
    fn storage(operation: &'static str, source: StorageError) -> Self {
        error!("Storage failure during {}: {}", operation, source);
        Self::Storage { operation, source }
    }
}

/// Service for creating and resolving short links.
///
/// Owns explicit handles to the storage adapter and the code generator; both
/// may be trait objects (see [`crate::state::DynLinkService`]).
pub struct LinkService<L: ?Sized, G: ?Sized> {
    link_repository: Arc<L>,
    code_generator: Arc<G>,
}

impl<L, G> LinkService<L, G>
where
    L: LinkRepository + ?Sized,
    G: CodeGenerator + ?Sized,
{
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, code_generator: Arc<G>) -> Self {
        Self {
            link_repository,
            code_generator,
        }
    }

    /// Creates a short link for `original_url`.
    ///
    /// # Protocol
    ///
    /// 1. Validate the URL (non-empty, `http://` or `https://` prefix)
    /// 2. Generate a candidate and check it against storage, up to
    ///    [`MAX_ATTEMPTS`] times; codes shadowed by fixed routes are skipped
    /// 3. Insert the first free candidate
    ///
    /// The check and the insert are not atomic. A concurrent insert of the
    /// same code is caught by the storage uniqueness constraint and reported
    /// as [`ShortenError::Collision`]; it is not retried here.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::Validation`] on bad input
    /// - [`ShortenError::ExhaustedRetries`] if every candidate was taken
    /// - [`ShortenError::Collision`] if the insert lost a race
    /// - [`ShortenError::Storage`] on any backend fault
    pub async fn shorten(&self, original_url: &str) -> Result<ShortLink, ShortenError> {
        validate_original_url(original_url)?;

        let short_code = self.find_free_code().await?;

        let new_link = NewShortLink {
            original_url: original_url.to_string(),
            short_code: short_code.clone(),
        };

        match self.link_repository.insert(new_link).await {
            Ok(link) => {
                info!(
                    "Created short code '{}' for '{}' (id: {})",
                    link.short_code, link.original_url, link.id
                );
                Ok(link)
            }
            Err(StorageError::UniqueViolation { constraint }) => {
                warn!(
                    "Short code {} was inserted concurrently ({})",
                    short_code, constraint
                );
                Err(ShortenError::Collision { code: short_code })
            }
            Err(e) => Err(ShortenError::storage("insert", e)),
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if no link matches the code.
    /// Returns [`ShortenError::Storage`] on database errors.
    pub async fn resolve(&self, short_code: &str) -> Result<String, ShortenError> {
        match self.link_repository.lookup(short_code).await {
            Ok(Some(original_url)) => {
                info!("Redirecting short code {} to {}", short_code, original_url);
                Ok(original_url)
            }
            Ok(None) => {
                debug!("Short code not found: {}", short_code);
                Err(ShortenError::NotFound {
                    code: short_code.to_string(),
                })
            }
            Err(e) => Err(ShortenError::storage("lookup", e)),
        }
    }

    /// Verifies that the storage backend answers.
    pub async fn check_storage(&self) -> Result<(), StorageError> {
        self.link_repository.ping().await
    }

    /// Draws candidates until one is not present in storage.
    ///
    /// A storage error aborts immediately; only taken codes are retried.
    /// Reserved codes count as taken without a storage round-trip.
    async fn find_free_code(&self) -> Result<String, ShortenError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = self.code_generator.generate();
            debug!("Checking short code {} (attempt {})", candidate, attempt);

            if is_reserved_code(&candidate) {
                warn!("Short code {} is reserved, generating a new one", candidate);
                continue;
            }

            let taken = self
                .link_repository
                .exists(&candidate)
                .await
                .map_err(|e| ShortenError::storage("existence check", e))?;

            if !taken {
                return Ok(candidate);
            }

            warn!("Short code {} already exists, generating a new one", candidate);
        }

        error!(
            "Failed to generate a unique short code after {} attempts",
            MAX_ATTEMPTS
        );
        Err(ShortenError::ExhaustedRetries {
            attempts: MAX_ATTEMPTS,
        })
    }
}

/// Checks the precondition of [`LinkService::shorten`].
fn validate_original_url(original_url: &str) -> Result<(), ShortenError> {
    if original_url.is_empty() {
        return Err(ShortenError::Validation("URL cannot be empty".to_string()));
    }

    if !original_url.starts_with("http://") && !original_url.starts_with("https://") {
        return Err(ShortenError::Validation(
            "Invalid URL format (must start with http:// or https://)".to_string(),
        ));
    }

    Ok(())
}
