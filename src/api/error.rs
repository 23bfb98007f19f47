//! Error types for the HTTP layer.
//!
//! [`TransportError`] is what the wire produces. [`ApiError`] is what callers of
//! the [`PeopleService`](crate::api::PeopleService) see, after the
//! [`intercept`](crate::api::intercept) mapping has been applied.

use serde_json::Value;
use thiserror::Error;

/// Message carried by every failure where no response was received.
pub const NETWORK_ERROR: &str = "Network Error";

/// A failed remote call, before interception.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Decoded response body, when there was one.
    pub body: Option<Value>,
}

impl TransportError {
    /// No response was received (connection refused, timeout, DNS...).
    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR.to_string(),
            status: None,
            body: None,
        }
    }

    /// The server answered with a non-success status.
    pub fn status(status: u16, body: Option<Value>) -> Self {
        Self {
            message: format!("Request failed with status code {status}"),
            status: Some(status),
            body,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }
}

/// Errors returned by the people service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The service could not be reached.
    #[error("connection error")]
    Connection,

    /// The server rejected the credentials. Intentionally opaque.
    #[error("something went wrong")]
    Unauthorized,

    /// Any other transport failure, unchanged.
    #[error(transparent)]
    Transport(TransportError),

    /// The call succeeded but the body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}
