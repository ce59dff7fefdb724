//! Shared Error Types
//!
//! This module defines error types for request validation and value parsing
//! that are independent of the HTTP layer.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Request field validation failures
//! - `UnknownVariant` - A stored or submitted value that does not name a known variant
//!
//! # Usage
//!
//! ```rust
//! use chatbox_saas::shared::error::SharedError;
//!
//! let error = SharedError::validation("domain_url", "Domain must not contain whitespace");
//! ```
use thiserror::Error;

/// Validation and parsing errors shared by every backend module
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A string that should name an enum variant did not
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant {
        /// Which enum was being parsed (e.g. "plan")
        kind: &'static str,
        /// The offending value
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
