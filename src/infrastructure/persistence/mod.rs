//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Short link storage and lookup
//!
//! # Schema
//!
//! The `urls` table is created by the embedded [`MIGRATOR`]. The migration
//! uses `CREATE TABLE IF NOT EXISTS`, so running it against a database that
//! already has the table is a no-op.

use sqlx::migrate::Migrator;

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;

/// Embedded schema migrations from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
