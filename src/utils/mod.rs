//! Utility functions for code generation and error classification.
//!
//! - [`code_generator`] - Short code generation and shape validation
//! - [`db_error`] - Unique violation detection for `sqlx` errors

pub mod code_generator;
pub mod db_error;
