//! Core error types for curricula-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering input
//! presence checks and key-space violations.

use thiserror::Error;

/// Core errors produced by the curricula-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required input field was absent or blank.
    #[error("missing required field: '{field}'")]
    MissingField { field: &'static str },

    /// A subject or program code cannot be used to build a key.
    #[error("invalid code '{code}': {reason}")]
    InvalidCode { code: String, reason: String },

    /// A stored key does not follow the key-space layout.
    #[error("malformed key: '{key}'")]
    MalformedKey { key: String },

    /// A record could not be converted to its stored JSON form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
