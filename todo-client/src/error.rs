//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers
//! frequently branch on them: "the item does not exist" and "the server
//! rejected the input" are ordinary outcomes, not transport failures. All
//! other non-2xx responses land in `Http` with the raw status code and body
//! for debugging.

use std::fmt;

/// Errors returned by `TodoApi` methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested todo does not exist.
    NotFound,

    /// The server returned 400 — the payload failed validation, e.g. a
    /// description over the length limit.
    Validation(String),

    /// The server returned a non-2xx status other than 404 and 400.
    Http { status: u16, body: String },

    /// The HTTP round-trip itself failed (connection, timeout, ...).
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Validation(body) => write!(f, "validation rejected: {body}"),
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
