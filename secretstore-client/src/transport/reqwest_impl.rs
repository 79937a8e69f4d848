use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{HttpRequest, HttpResponse, HttpTransport, RpcTransport};
use crate::{
    error::TransportError,
    models::jsonrpc::{JsonRpcRequest, JsonRpcResponse},
};

fn build_client(timeout: Option<Duration>) -> Result<Client, TransportError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| TransportError::new(format!("failed to build HTTP client: {}", e)))
}

/// JSON-RPC over HTTP, as served by a Parity node on its RPC port
#[derive(Debug, Clone)]
pub struct HttpRpcTransport {
    client: Client,
    url: String,
}

impl HttpRpcTransport {
    /// Create a transport posting envelopes to `url`
    ///
    /// # Arguments
    ///
    /// * `url` - JSON-RPC endpoint of the node
    /// * `timeout` - Per-request timeout; `None` keeps reqwest's default
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let url = url.into();
        info!("Using JSON-RPC endpoint {}", url);
        Ok(Self {
            client: build_client(timeout)?,
            url,
        })
    }

    /// Reuse an existing reqwest client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn send(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        debug!("Sending {} to {}", request.method, self.url);
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Parity reports RPC failures inside a 200 envelope; anything else that
        // does not parse never reached the RPC layer.
        serde_json::from_str(&body).map_err(|e| {
            TransportError::new(format!(
                "invalid JSON-RPC response (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })
    }
}

/// Plain HTTP client for Secret Store session requests
#[derive(Debug, Clone)]
pub struct ReqwestHttpTransport {
    client: Client,
}

impl ReqwestHttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("{} {}", request.method, request.url);
        let mut builder = self.client.request(request.method.clone(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse::new(status, body))
    }
}
