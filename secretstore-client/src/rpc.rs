use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    diagnostics::{Diagnostics, Silent},
    error::ClientError,
    models::jsonrpc::JsonRpcRequest,
    transport::RpcTransport,
};

/// JSON-RPC client shared by the RPC facades
///
/// Sends one envelope per call and classifies the outcome into a transport
/// error, an RPC error or a decoded result.
#[derive(Clone)]
pub struct RpcClient<T> {
    transport: T,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<T: RpcTransport> RpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            diagnostics: Arc::new(Silent),
        }
    }

    pub fn set_diagnostics(&mut self, diagnostics: Arc<dyn Diagnostics>) {
        self.diagnostics = diagnostics;
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `method` with positional `params` and decode the result
    ///
    /// # Returns
    ///
    /// * `Result<R, ClientError>` - The decoded `result` field, or the failure
    ///   reported by the transport or the remote node
    pub async fn call<R: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<R, ClientError> {
        let request = JsonRpcRequest::new(method, params);
        debug!("Calling {} with {} params", method, request.params.len());

        let outcome = match self.transport.send(&request).await {
            Ok(response) => response.into_result(method),
            Err(e) => Err(ClientError::Transport(e)),
        };

        if let Err(e) = &outcome {
            self.diagnostics.error(method, e);
        }
        outcome
    }
}
