use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::{HttpRequest, HttpResponse};

/// Client error types
///
/// Every facade call resolves to exactly one of these variants. None of them
/// is retried or recovered locally; the caller decides what to do next.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The transport could not deliver the request or read a reply
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The JSON-RPC envelope carried an `error` object
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(RpcError),

    /// A Secret Store session answered with a non-200 status
    #[error("{0}")]
    Session(Box<SessionError>),

    /// A success response whose body does not have the shape the endpoint declares
    #[error("unexpected response from {endpoint}: {reason}")]
    Protocol {
        /// RPC method name or HTTP session path
        endpoint: String,

        /// What was wrong with the body
        reason: String,
    },

    /// A request rejected before any I/O took place
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Build a protocol-violation error for the given endpoint
    pub fn protocol(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::Protocol {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// The RPC error object, if the remote node reported one
    pub fn as_rpc(&self) -> Option<&RpcError> {
        match self {
            ClientError::Rpc(err) => Some(err),
            _ => None,
        }
    }

    /// The failed session, if a Secret Store node answered with a non-200 status
    pub fn as_session(&self) -> Option<&SessionError> {
        match self {
            ClientError::Session(err) => Some(err),
            _ => None,
        }
    }
}

/// Connection-level failure reported by a transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the failure
    pub message: String,
}

impl TransportError {
    /// Create a transport error
    ///
    /// # Arguments
    ///
    /// * `message` - What went wrong, usually the HTTP client's own error text
    ///
    /// # Returns
    ///
    /// * A transport error carrying `message` unchanged
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// JSON-RPC 2.0 error detail
///
/// Carried unchanged from the remote node's response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Non-200 answer from a Secret Store node
///
/// Holds the full response together with the request that produced it, so the
/// caller can tell an expired signature from an unreachable threshold. The
/// status text in the message is the canonical phrase for the code (see
/// [`HttpResponse::status_message`]); the node's own explanation is in the body.
#[derive(Error, Debug, Clone)]
#[error(
    "secret store session {} {} failed: {} {}",
    .request.method,
    .request.url,
    .response.status.as_u16(),
    .response.status_message()
)]
pub struct SessionError {
    /// Request as it was sent
    pub request: HttpRequest,

    /// Response as it was received
    pub response: HttpResponse,
}
