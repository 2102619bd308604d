//! Error types for the gateway client.
//!
//! # Design
//! Three kinds of failure are kept apart so callers chaining one call's output
//! into the next can tell them apart: a request that could not be built
//! (`SchemaConstruction`, raised before any network call), a response that did
//! not match its schema (`SchemaValidation`, raised after the call completed),
//! and anything the transport reports, including non-2xx statuses.

use thiserror::Error;

/// Failures reported by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a status outside `200..300`.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors returned by gateway client methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request field had neither a supplied value nor a default factory, or
    /// the supplied value had the wrong kind.
    #[error("cannot construct {schema}: field `{field}` {reason}")]
    SchemaConstruction {
        schema: &'static str,
        field: String,
        reason: String,
    },

    /// The response body did not conform to the expected schema.
    #[error("unexpected {schema} payload: field `{field}` {reason}")]
    SchemaValidation {
        schema: &'static str,
        field: String,
        reason: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Construction,
    Validation,
    Transport,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::SchemaConstruction { .. } | ApiError::Serialization(_) => ErrorKind::Construction,
            ApiError::SchemaValidation { .. } => ErrorKind::Validation,
            ApiError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// The offending field for schema errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ApiError::SchemaConstruction { field, .. } | ApiError::SchemaValidation { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }

    /// A request that could not be built; `field` names the offending field.
    pub fn construction(schema: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::SchemaConstruction {
            schema,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A payload that does not match its schema; `field` is the dotted wire
    /// path of the offending value.
    pub fn validation(schema: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::SchemaValidation {
            schema,
            field: field.into(),
            reason: reason.into(),
        }
    }
}
