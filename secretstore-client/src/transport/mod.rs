//! Transports the facades send their requests through
//!
//! Two collaborators are consumed: a JSON-RPC connection to a Parity node and
//! a plain HTTP client for Secret Store sessions. Both are traits so callers
//! can inject pooled, authenticated or mocked implementations.

use std::sync::Arc;

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde_json::Value;

use crate::{
    error::TransportError,
    models::jsonrpc::{JsonRpcRequest, JsonRpcResponse},
};

mod reqwest_impl;

pub use reqwest_impl::{HttpRpcTransport, ReqwestHttpTransport};

/// A connection able to deliver one JSON-RPC envelope and return the reply
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;
}

/// An HTTP client able to issue one request to an arbitrary URL
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    async fn send(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Secret Store session request as built by the session facade
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// `GET` for retrieval and signing sessions, `POST` for everything else
    pub method: Method,

    /// Fully built session URL
    pub url: String,

    /// Optional JSON body
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Create a `GET` request without a body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    /// Create a `POST` request; attach a body with [`HttpRequest::with_json`]
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: None,
        }
    }

    /// Attach a JSON body to the request
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw answer of a Secret Store node
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Status code as received
    pub status: StatusCode,

    /// Body as received, not trimmed or decoded
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status code and a body
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Canonical reason phrase of the status code
    ///
    /// The phrase is derived from the code, not taken from the wire: a node
    /// sending `403 Access Denied` reports `"Forbidden"` here. Codes without a
    /// registered phrase report `"Unknown"`.
    pub fn status_message(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }
}
