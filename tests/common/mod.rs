#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use shorturl::domain::entities::{NewShortLink, ShortLink};
use shorturl::domain::repositories::{LinkRepository, StorageError};
use shorturl::infrastructure::persistence::PgLinkRepository;
use shorturl::routes::router;
use shorturl::state::AppState;
use shorturl::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO urls (original_url, short_code) VALUES ($1, $2) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::from_pool(pool)
}

pub fn create_state_with(
    repository: impl LinkRepository + 'static,
    generator: impl CodeGenerator + 'static,
) -> AppState {
    AppState::new(Arc::new(repository), Arc::new(generator))
}

pub fn pg_repository(pool: &PgPool) -> PgLinkRepository {
    PgLinkRepository::new(Arc::new(pool.clone()))
}

pub fn test_server(state: AppState) -> TestServer {
    let app: Router = router(state, "tests/static");
    TestServer::new(app).unwrap()
}

/// Always hands out the same code.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Counts how many candidates were drawn.
#[derive(Clone, Default)]
pub struct CountingGenerator {
    pub calls: Arc<AtomicUsize>,
}

impl CodeGenerator for CountingGenerator {
    fn generate(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RandomCodeGenerator.generate()
    }
}

/// Storage whose every operation fails as if the backend were down.
pub struct FailingLinkRepository;

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn exists(&self, _short_code: &str) -> Result<bool, StorageError> {
        Err(StorageError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _new_link: NewShortLink) -> Result<ShortLink, StorageError> {
        Err(StorageError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn lookup(&self, _short_code: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::Backend(sqlx::Error::PoolTimedOut))
    }
}

/// Postgres storage that skips the existence check, so every insert relies
/// on the uniqueness constraint alone. Simulates losing the check/insert race.
pub struct UncheckedLinkRepository(pub PgLinkRepository);

#[async_trait]
impl LinkRepository for UncheckedLinkRepository {
    async fn exists(&self, _short_code: &str) -> Result<bool, StorageError> {
        Ok(false)
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StorageError> {
        self.0.insert(new_link).await
    }

    async fn lookup(&self, short_code: &str) -> Result<Option<String>, StorageError> {
        self.0.lookup(short_code).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.0.ping().await
    }
}
