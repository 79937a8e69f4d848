use std::sync::Arc;

use crate::{
    private_tx::PrivateTransactions,
    secretstore::{SecretStoreRpc, SecretStoreSessions},
    transport::{HttpRpcTransport, ReqwestHttpTransport},
};

/// All three facades over the default reqwest transports
///
/// The two RPC facades share one JSON-RPC connection. Built by
/// [`ClientConfig::connect`](crate::config::ClientConfig::connect).
#[derive(Clone)]
pub struct ParityClients {
    pub secret_store: SecretStoreRpc<Arc<HttpRpcTransport>>,
    pub sessions: SecretStoreSessions<ReqwestHttpTransport>,
    pub private: PrivateTransactions<Arc<HttpRpcTransport>>,
}
