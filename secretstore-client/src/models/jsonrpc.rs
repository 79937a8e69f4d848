use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ClientError, RpcError};

/// JSON-RPC protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Request identifier; every call is a single round trip so one literal is enough
pub const REQUEST_ID: u64 = 1;

/// JSON-RPC 2.0 request structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Positional method parameters
    pub params: Vec<Value>,

    /// Request identifier
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new request envelope for `method`
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: REQUEST_ID,
        }
    }
}

/// JSON-RPC 2.0 response
///
/// A well-formed response carries either `result` or `error`. Both are kept
/// optional here so that a malformed envelope can be reported instead of
/// failing deserialization at the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,

    /// Request identifier (matching the request)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Method result; a `null` result is `Some(Value::Null)`, an absent one `None`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// Keep a field that is present in the envelope, even when it is `null`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(Value::from(REQUEST_ID)),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(Value::from(REQUEST_ID)),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Classify the envelope and decode the result into `T`
    ///
    /// An `error` field wins over a `result` field. A missing result, or one
    /// that does not decode into `T`, is a protocol violation for `method`.
    pub fn into_result<T: DeserializeOwned>(self, method: &str) -> Result<T, ClientError> {
        if let Some(error) = self.error {
            return Err(ClientError::Rpc(error));
        }

        let result = self
            .result
            .ok_or_else(|| ClientError::protocol(method, "response has neither result nor error"))?;

        serde_json::from_value(result)
            .map_err(|e| ClientError::protocol(method, format!("unexpected result shape: {}", e)))
    }
}
