//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request and response types for a specific
//! API domain. Field names follow the JSON wire format, which is Spanish for
//! the catalog routes.

pub mod programs;
pub mod subjects;
pub mod users;

use curricula_core::CoreError;

/// Unwraps a required field; blank strings count as absent.
pub(crate) fn required_text(field: &'static str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CoreError::MissingField { field }),
    }
}

pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or(CoreError::MissingField { field })
}
