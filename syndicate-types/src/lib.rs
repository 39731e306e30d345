//! Logical data type definitions for Syndicate.
//!
//! This crate owns the schema-level vocabulary shared by stream readers and
//! the value normalizer:
//! - [`LogicalType`] — the declared category of a value (integer, string, ...)
//! - helpers for reading the JSON-schema `"type"` keyword, which may be a
//!   single name or a list of candidate names with `"null"` mixed in
//!
//! Physical representations and coercion rules live in `syndicate-reformat`.

mod logical_type;

pub use logical_type::LogicalType;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading logical types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid logical type: {0}")]
    InvalidLogicalType(String),
}
