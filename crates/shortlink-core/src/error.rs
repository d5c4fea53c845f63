//! Error types for shortlink.
//!
//! One unified error type with explicit variants for transport, protocol,
//! response validation and input validation failures. Every variant carries a
//! human-readable message suitable for showing to the user as-is.

use std::fmt;
use thiserror::Error;

/// The unified error type for shortlink operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend could not be reached or the exchange broke down.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An auth response lacked the access token, refresh token or user id.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// Input validation errors (base URL, token fields, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// HTTP status of a protocol error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Nothing answered at the configured base URL.
    #[error("Cannot connect to server at {base_url}. Make sure the backend is running.")]
    Unreachable { base_url: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read or decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response that the refresh protocol did not resolve.
///
/// `Display` yields the message alone: the backend's own `message`/`error`
/// field when it sent one, otherwise `"<status> <reason>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Message to surface to the caller.
    pub message: String,
}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A credential field was empty.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// A header name or value could not be encoded.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
