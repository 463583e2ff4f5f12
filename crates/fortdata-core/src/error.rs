//! Error types for fortdata core library.

use thiserror::Error;

/// Result type alias using fortdata Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for fortdata operations.
///
/// Parsing is all-or-nothing: any of the parse variants aborts construction
/// of the enclosing object.
#[derive(Debug, Error)]
pub enum Error {
    /// A required key is absent from a mapping.
    #[error("{context}: missing required field '{field}'")]
    MissingField {
        context: &'static str,
        field: String,
    },

    /// A "type:id" composite lacks its colon-delimited structure.
    #[error("{context}: malformed composite value '{value}'")]
    MalformedComposite {
        context: &'static str,
        value: String,
    },

    /// A key is present but holds the wrong JSON type.
    #[error("{context}: field '{field}' is not {expected}")]
    WrongType {
        context: &'static str,
        field: String,
        expected: &'static str,
    },

    /// A timestamp field is not ISO-8601.
    #[error("{context}: field '{field}' has invalid timestamp '{value}'")]
    InvalidTimestamp {
        context: &'static str,
        field: String,
        value: String,
    },

    /// A value outside a closed enumeration.
    #[error("unknown {kind} value '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// A query expected at least one matching item.
    #[error("no {0} item found in profile")]
    ItemNotFound(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
