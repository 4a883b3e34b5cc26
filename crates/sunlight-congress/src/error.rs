//! Error types surfaced by API calls and relation accessors.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can occur when calling the Sunlight Congress API.
///
/// Nothing is retried, logged or swallowed internally: every variant reaches
/// the immediate caller as-is.
#[derive(Debug, Error)]
pub enum SunlightError {
    /// The transport failed before a response was received (DNS, connect, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status; `message` is the body text.
    ///
    /// The service reports bad filters as 400-class statuses with a plain-text
    /// body. Server-side failures (5xx) land here too, with their status kept
    /// so callers can tell them apart.
    #[error("request rejected ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    /// The response body did not match the expected envelope shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A relation accessor was called on an entity missing its identifying field.
    #[error("cannot resolve relation: missing {0}")]
    InvalidState(&'static str),
}

/// A response body that does not match the envelope shape an endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode response at {path}: {message}")]
pub struct DecodeError {
    /// Location of the offending value, e.g. `response.committees[1].committee.name`.
    pub path: String,
    pub message: String,
}

impl DecodeError {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
