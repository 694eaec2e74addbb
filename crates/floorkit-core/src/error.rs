//! Error handling for FloorKit
//!
//! Geometry and interaction never fail: degenerate input degrades to an
//! inert state. The only fallible paths are document conversion and I/O,
//! which are described here.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Document error type
///
/// Raised while converting a persisted plan document into scene objects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Opening kind string is neither door nor window
    #[error("Unknown opening kind: {kind}")]
    UnknownKind {
        /// The unrecognised kind.
        kind: String,
    },

    /// Opening style string does not belong to the opening kind
    #[error("Unknown {kind} style: {style}")]
    UnknownStyle {
        /// The opening kind the style was read for.
        kind: String,
        /// The unrecognised style.
        style: String,
    },

    /// Payload could not be parsed
    #[error("Malformed payload: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },
}

/// Main error type for FloorKit
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
