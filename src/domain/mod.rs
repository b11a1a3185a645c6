//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the infrastructure or
//! presentation layers. The shortening protocol that drives these types
//! lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
