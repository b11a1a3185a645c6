//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation
//! input is kept in a separate struct (`NewShortLink`) because the store
//! assigns `id` and `created_at`.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
