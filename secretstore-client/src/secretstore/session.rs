use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    diagnostics::{Diagnostics, Silent},
    error::{ClientError, SessionError},
    models::secretstore::{
        DocumentKeyShadow, GenerateServerKeyRequest, ServersSetChangeRequest, SessionKey,
        SignMessageRequest, StoreDocumentKeyRequest,
    },
    normalize::{ensure_hex_prefix, hex_path_segment, is_quoted, unwrap_quoted_string},
    transport::{HttpRequest, HttpResponse, HttpTransport},
};

/// Secret Store sessions opened directly on a key server's HTTP listener
///
/// Each call runs one multi-party session on the cluster. A non-200 answer
/// (expired signature, threshold not reachable, node down) is returned as
/// [`ClientError::Session`] with the whole exchange attached.
#[derive(Clone)]
pub struct SecretStoreSessions<H> {
    transport: H,
    base_url: String,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<H: HttpTransport> SecretStoreSessions<H> {
    /// Create a facade for the key server listening at `base_url`
    ///
    /// # Arguments
    ///
    /// * `transport` - HTTP client the session requests go through
    /// * `base_url` - Key server HTTP endpoint; a trailing slash is ignored
    ///
    /// # Returns
    ///
    /// * A facade that reports nothing until diagnostics are attached
    pub fn new(transport: H, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            diagnostics: Arc::new(Silent),
        }
    }

    /// Report failed calls to `diagnostics` instead of discarding them
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Server key generation session; the document key is stored later
    ///
    /// # Returns
    ///
    /// * `Result<String, ClientError>` - The generated server public key
    #[instrument(skip_all, fields(threshold = request.threshold))]
    pub async fn generate_server_key(&self, request: &GenerateServerKeyRequest) -> Result<String, ClientError> {
        let mut segments = vec!["shadow".to_string()];
        segments.extend(self.key_segments(&request.key)?);
        segments.push(request.threshold.to_string());

        let response = self.send(HttpRequest::post(self.url(&segments))).await?;
        self.quoted_body("generate server key", response)
    }

    /// Server and document key generation session in one step
    ///
    /// # Returns
    ///
    /// * `Result<String, ClientError>` - The document key, encrypted for the requester
    #[instrument(skip_all, fields(threshold = request.threshold))]
    pub async fn generate_server_and_document_key(
        &self,
        request: &GenerateServerKeyRequest,
    ) -> Result<String, ClientError> {
        let mut segments = self.key_segments(&request.key)?;
        segments.push(request.threshold.to_string());

        let response = self.send(HttpRequest::post(self.url(&segments))).await?;
        self.quoted_body("generate server and document key", response)
    }

    /// Document key storing session, binding an externally generated key to a server key
    ///
    /// The body is returned as the node sent it.
    #[instrument(skip_all)]
    pub async fn store_document_key(&self, request: &StoreDocumentKeyRequest) -> Result<String, ClientError> {
        let mut segments = vec!["shadow".to_string()];
        segments.extend(self.key_segments(&request.key)?);
        segments.push(self.segment("common_point", &request.common_point)?);
        segments.push(self.segment("encrypted_point", &request.encrypted_point)?);

        let response = self.send(HttpRequest::post(self.url(&segments))).await?;
        Ok(response.body)
    }

    /// Document key shadow retrieval session
    #[instrument(skip_all)]
    pub async fn shadow_retrieve_document_key(&self, key: &SessionKey) -> Result<DocumentKeyShadow, ClientError> {
        let mut segments = vec!["shadow".to_string()];
        segments.extend(self.key_segments(key)?);

        let response = self.send(HttpRequest::get(self.url(&segments))).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            self.fail(
                "shadow retrieve document key",
                ClientError::protocol("shadow retrieve document key", format!("body is not a document key shadow: {}", e)),
            )
        })
    }

    /// Document key retrieval session
    ///
    /// # Returns
    ///
    /// * `Result<String, ClientError>` - The document key, encrypted for the requester
    #[instrument(skip_all)]
    pub async fn retrieve_document_key(&self, key: &SessionKey) -> Result<String, ClientError> {
        let segments = self.key_segments(key)?;

        let response = self.send(HttpRequest::get(self.url(&segments))).await?;
        self.quoted_body("retrieve document key", response)
    }

    /// Schnorr signing session over `message_hash`
    #[instrument(skip_all)]
    pub async fn schnorr_sign(&self, request: &SignMessageRequest) -> Result<String, ClientError> {
        self.sign("schnorr", request).await
    }

    /// ECDSA signing session over `message_hash`
    #[instrument(skip_all)]
    pub async fn ecdsa_sign(&self, request: &SignMessageRequest) -> Result<String, ClientError> {
        self.sign("ecdsa", request).await
    }

    /// Administrative servers set change session
    ///
    /// The node's answer is not documented, so it is handed back as an opaque
    /// string with enclosing quotes removed if there are any.
    #[instrument(skip_all, fields(new_set = request.new_set.len()))]
    pub async fn servers_set_change(&self, request: &ServersSetChangeRequest) -> Result<String, ClientError> {
        let segments = vec![
            "admin".to_string(),
            "servers_set_change".to_string(),
            self.segment("signature_old_set", &request.signature_old_set)?,
            self.segment("signature_new_set", &request.signature_new_set)?,
        ];
        let new_set = Value::from(
            request
                .new_set
                .iter()
                .map(|id| ensure_hex_prefix(id))
                .collect::<Vec<_>>(),
        );

        let response = self
            .send(HttpRequest::post(self.url(&segments)).with_json(new_set))
            .await?;
        Ok(unwrap_quoted_string(&response.body))
    }

    async fn sign(&self, scheme: &'static str, request: &SignMessageRequest) -> Result<String, ClientError> {
        let mut segments = vec![scheme.to_string()];
        segments.extend(self.key_segments(&request.key)?);
        segments.push(self.segment("message_hash", &request.message_hash)?);

        let response = self.send(HttpRequest::get(self.url(&segments))).await?;
        self.quoted_body(scheme, response)
    }

    /// Issue the request and turn every non-200 answer into a session error
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!("Secret store session {} {}", request.method, request.url);
        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(&request.url, ClientError::Transport(e))),
        };

        if response.status != StatusCode::OK {
            self.diagnostics.http_failure(&request, &response);
            let url = request.url.clone();
            return Err(self.fail(&url, ClientError::Session(Box::new(SessionError { request, response }))));
        }
        Ok(response)
    }

    fn quoted_body(&self, endpoint: &str, response: HttpResponse) -> Result<String, ClientError> {
        if !is_quoted(&response.body) {
            return Err(self.fail(
                endpoint,
                ClientError::protocol(endpoint, format!("expected a quoted string, got {:?}", response.body)),
            ));
        }
        Ok(unwrap_quoted_string(&response.body))
    }

    fn key_segments(&self, key: &SessionKey) -> Result<Vec<String>, ClientError> {
        Ok(vec![
            self.segment("server_key_id", &key.server_key_id)?,
            self.segment("signed_server_key_id", &key.signed_server_key_id)?,
        ])
    }

    fn segment(&self, field: &str, value: &str) -> Result<String, ClientError> {
        hex_path_segment(field, value).map_err(|e| self.fail(field, e))
    }

    fn url(&self, segments: &[String]) -> String {
        format!("{}/{}", self.base_url, segments.join("/"))
    }

    fn fail(&self, endpoint: &str, error: ClientError) -> ClientError {
        self.diagnostics.error(endpoint, &error);
        error
    }
}
