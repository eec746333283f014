//! Error types for the vibes client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, HTTP status, token refresh, credential storage and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for vibes operations.
///
/// This error type covers every failure mode of the client, with explicit
/// variants so callers can handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP status error: {0}")]
    Status(#[from] StatusError),

    /// The access token expired and refreshing it failed.
    #[error("{0}")]
    RefreshFailed(#[from] RefreshFailedError),

    /// The credential store could not be read or written.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (bad URL, header value, signup form).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The call was cancelled through its cancellation token.
    #[error("request cancelled")]
    Cancelled,
}

/// Coarse classification of an [`Error`].
///
/// The refresh decorator matches on [`ErrorKind::AuthExpired`] to decide
/// whether a failed call may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    AuthExpired,
    Status,
    RefreshFailed,
    Store,
    InvalidInput,
    Cancelled,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Status(e) if e.is_auth_expired() => ErrorKind::AuthExpired,
            Error::Status(_) => ErrorKind::Status,
            Error::RefreshFailed(_) => ErrorKind::RefreshFailed,
            Error::Store(_) => ErrorKind::Store,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(e) => Some(e.status),
            Error::RefreshFailed(e) => e.source.status(),
            _ => None,
        }
    }

    /// Structured message from the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Status(e) => e.message.as_deref(),
            _ => None,
        }
    }
}

/// Transport-level errors: no usable response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// A 2xx body could not be decoded into the expected type.
    #[error("failed to decode response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response.
#[derive(Debug)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if the body carried one).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
    /// Raw JSON body, when it parsed as JSON.
    pub body: Option<serde_json::Value>,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

impl StatusError {
    /// Create a status error without a body.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
            body: None,
        }
    }

    /// Build a status error from a response body.
    ///
    /// JSON bodies contribute their `error` and `message` string fields.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let body: Option<serde_json::Value> = serde_json::from_slice(body).ok();
        let field = |name: &str| {
            body.as_ref()
                .and_then(|b| b.get(name))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Self {
            status,
            error: field("error"),
            message: field("message"),
            body,
        }
    }

    /// Whether this is an expired or invalid access token (HTTP 401).
    pub fn is_auth_expired(&self) -> bool {
        self.status == 401
    }
}

/// The token refresh call failed.
///
/// Persisted credentials have already been cleared when this is returned.
#[derive(Debug, Error)]
#[error("token refresh failed: {source}")]
pub struct RefreshFailedError {
    #[source]
    pub source: Box<Error>,
}

impl RefreshFailedError {
    pub fn new(source: Error) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be parsed.
    #[error("corrupt credential data: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A header name or value could not be encoded.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// The signup form failed validation.
    #[error("{0}")]
    Signup(#[from] crate::signup::ValidationError),

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
