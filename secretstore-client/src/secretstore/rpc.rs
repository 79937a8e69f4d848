use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::{
    diagnostics::Diagnostics,
    error::ClientError,
    models::secretstore::{
        DecryptRequest, EncryptRequest, EncryptedDocumentKey, GenerateDocumentKeyRequest,
        ShadowDecryptRequest, SignRawHashRequest,
    },
    normalize::ensure_hex_prefix,
    rpc::RpcClient,
    transport::RpcTransport,
};

/// Secret Store operations executed by a local node's `secretstore` RPC module
///
/// The node signs and encrypts with keys of its own accounts, so every call
/// carries the account and its password.
#[derive(Clone)]
pub struct SecretStoreRpc<T> {
    client: RpcClient<T>,
}

impl<T: RpcTransport> SecretStoreRpc<T> {
    /// Create a facade over a JSON-RPC transport
    ///
    /// # Arguments
    ///
    /// * `transport` - Connection to the node's JSON-RPC endpoint
    ///
    /// # Returns
    ///
    /// * A facade that reports nothing until diagnostics are attached
    pub fn new(transport: T) -> Self {
        Self {
            client: RpcClient::new(transport),
        }
    }

    /// Report failed calls to `diagnostics` instead of discarding them
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.client.set_diagnostics(diagnostics);
        self
    }

    /// Sign a raw hash with the account's key (no prefix, no hashing)
    ///
    /// Used to sign server key IDs and servers set hashes before opening a session.
    #[instrument(skip_all)]
    pub async fn sign_raw_hash(&self, request: &SignRawHashRequest) -> Result<String, ClientError> {
        self.client.call("secretstore_signRawHash", request.params()).await
    }

    /// Generate a document key bound to `server_key`, encrypted for the account
    #[instrument(skip_all)]
    pub async fn generate_document_key(
        &self,
        request: &GenerateDocumentKeyRequest,
    ) -> Result<EncryptedDocumentKey, ClientError> {
        self.client.call("secretstore_generateDocumentKey", request.params()).await
    }

    /// Encrypt a hex document with a key received from the Secret Store
    #[instrument(skip_all)]
    pub async fn encrypt(&self, request: &EncryptRequest) -> Result<String, ClientError> {
        self.client.call("secretstore_encrypt", request.params()).await
    }

    /// Decrypt a document with a key received from the Secret Store
    ///
    /// # Returns
    ///
    /// * `Result<String, ClientError>` - The decrypted document, hex-encoded
    #[instrument(skip_all)]
    pub async fn decrypt(&self, request: &DecryptRequest) -> Result<String, ClientError> {
        self.client.call("secretstore_decrypt", request.params()).await
    }

    /// Decrypt a document with a document key shadow
    #[instrument(skip_all)]
    pub async fn shadow_decrypt(&self, request: &ShadowDecryptRequest) -> Result<String, ClientError> {
        self.client.call("secretstore_shadowDecrypt", request.params()).await
    }

    /// Hash of a servers set, to be signed for a servers set change session
    ///
    /// Node IDs are sent in the given order.
    #[instrument(skip_all, fields(nodes = node_ids.len()))]
    pub async fn servers_set_hash(&self, node_ids: &[String]) -> Result<String, ClientError> {
        let nodes: Vec<Value> = node_ids
            .iter()
            .map(|id| Value::from(ensure_hex_prefix(id)))
            .collect();
        self.client.call("secretstore_serversSetHash", vec![Value::Array(nodes)]).await
    }
}
