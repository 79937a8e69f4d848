//! Typed requests and responses of the Secret Store APIs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::ensure_hex_prefix;

/// Account unlocking a node-side key for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Address of the node account holding the key
    pub account: String,

    /// Passphrase unlocking `account`; sent to the node as given
    pub password: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }

    pub(crate) fn params(&self) -> Vec<Value> {
        vec![Value::from(self.account.as_str()), Value::from(self.password.as_str())]
    }
}

/// Parameters for `secretstore_signRawHash`
#[derive(Debug, Clone)]
pub struct SignRawHashRequest {
    pub credentials: Credentials,
    /// Hash to sign as-is; no prefix is added and no hash function applied
    pub hash: String,
}

impl SignRawHashRequest {
    pub(crate) fn params(&self) -> Vec<Value> {
        let mut params = self.credentials.params();
        params.push(Value::from(ensure_hex_prefix(&self.hash)));
        params
    }
}

/// Parameters for `secretstore_generateDocumentKey`
#[derive(Debug, Clone)]
pub struct GenerateDocumentKeyRequest {
    pub credentials: Credentials,
    /// Server key returned by a server key generation session
    pub server_key: String,
}

impl GenerateDocumentKeyRequest {
    pub(crate) fn params(&self) -> Vec<Value> {
        let mut params = self.credentials.params();
        params.push(Value::from(self.server_key.as_str()));
        params
    }
}

/// Document key generated by the node, encrypted for the requesting account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedDocumentKey {
    /// Pass to the document key storing session
    pub common_point: String,
    /// Pass to the document key storing session
    pub encrypted_point: String,
    /// Pass to `secretstore_encrypt`
    pub encrypted_key: String,
}

/// Parameters for `secretstore_encrypt`
#[derive(Debug, Clone)]
pub struct EncryptRequest {
    pub credentials: Credentials,
    pub encrypted_key: String,
    /// Hex-encoded plain document
    pub document: String,
}

impl EncryptRequest {
    pub(crate) fn params(&self) -> Vec<Value> {
        let mut params = self.credentials.params();
        params.push(Value::from(self.encrypted_key.as_str()));
        params.push(Value::from(ensure_hex_prefix(&self.document)));
        params
    }
}

/// Parameters for `secretstore_decrypt`
#[derive(Debug, Clone)]
pub struct DecryptRequest {
    pub credentials: Credentials,
    pub encrypted_key: String,
    pub encrypted_document: String,
}

impl DecryptRequest {
    pub(crate) fn params(&self) -> Vec<Value> {
        let mut params = self.credentials.params();
        params.push(Value::from(self.encrypted_key.as_str()));
        params.push(Value::from(self.encrypted_document.as_str()));
        params
    }
}

/// Parameters for `secretstore_shadowDecrypt`
#[derive(Debug, Clone)]
pub struct ShadowDecryptRequest {
    pub credentials: Credentials,
    pub decrypted_secret: String,
    pub common_point: String,
    pub decrypt_shadows: Vec<String>,
    pub encrypted_document: String,
}

impl ShadowDecryptRequest {
    /// Build the request from a shadow retrieved with a document key shadow retrieval session
    pub fn from_shadow(
        credentials: Credentials,
        shadow: DocumentKeyShadow,
        encrypted_document: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            decrypted_secret: shadow.decrypted_secret,
            common_point: shadow.common_point,
            decrypt_shadows: shadow.decrypt_shadows,
            encrypted_document: encrypted_document.into(),
        }
    }

    pub(crate) fn params(&self) -> Vec<Value> {
        let mut params = self.credentials.params();
        params.push(Value::from(self.decrypted_secret.as_str()));
        params.push(Value::from(self.common_point.as_str()));
        params.push(Value::from(self.decrypt_shadows.clone()));
        params.push(Value::from(self.encrypted_document.as_str()));
        params
    }
}

/// Shadow of a document key, as returned by a shadow retrieval session
///
/// The key itself is never reconstructed on a single node; the requester
/// combines the shadows (usually through `secretstore_shadowDecrypt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentKeyShadow {
    pub decrypted_secret: String,
    pub common_point: String,
    pub decrypt_shadows: Vec<String>,
}

/// Server key ID together with the requester's signature of it
///
/// Every Secret Store session URL starts with these two segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    pub server_key_id: String,
    pub signed_server_key_id: String,
}

impl SessionKey {
    pub fn new(server_key_id: impl Into<String>, signed_server_key_id: impl Into<String>) -> Self {
        Self {
            server_key_id: server_key_id.into(),
            signed_server_key_id: signed_server_key_id.into(),
        }
    }
}

/// Parameters for server key (and server + document key) generation sessions
#[derive(Debug, Clone)]
pub struct GenerateServerKeyRequest {
    pub key: SessionKey,
    /// Number of nodes that must cooperate, minus one
    pub threshold: u32,
}

/// Parameters for the document key storing session
#[derive(Debug, Clone)]
pub struct StoreDocumentKeyRequest {
    pub key: SessionKey,
    pub common_point: String,
    pub encrypted_point: String,
}

/// Parameters for Schnorr and ECDSA signing sessions
#[derive(Debug, Clone)]
pub struct SignMessageRequest {
    pub key: SessionKey,
    pub message_hash: String,
}

/// Parameters for the administrative servers set change session
#[derive(Debug, Clone)]
pub struct ServersSetChangeRequest {
    /// Old set hash signed by the administrator
    pub signature_old_set: String,
    /// New set hash signed by the administrator
    pub signature_new_set: String,
    /// Node IDs of the new set, sent as the JSON body
    pub new_set: Vec<String>,
}
