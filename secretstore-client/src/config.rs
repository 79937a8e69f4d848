use eyre::Result;
use std::{env, sync::Arc, time::Duration};

use crate::{
    client::ParityClients,
    diagnostics,
    private_tx::PrivateTransactions,
    secretstore::{SecretStoreRpc, SecretStoreSessions},
    transport::{HttpRpcTransport, ReqwestHttpTransport},
};

/// Client configuration structure
///
/// Endpoints of the Parity node and of the Secret Store key server, plus the
/// few knobs the reqwest transports take.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Parity JSON-RPC endpoint (default: http://localhost:8545)
    pub rpc_url: String,

    /// Secret Store HTTP listener (default: http://localhost:8082)
    pub secret_store_url: String,

    /// Per-request timeout in seconds; unset keeps the HTTP client default
    pub timeout_secs: Option<u64>,

    /// Log failed calls through tracing (default: true)
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            secret_store_url: "http://localhost:8082".to_string(),
            timeout_secs: None,
            verbose: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// * `PARITY_RPC_URL` - Parity JSON-RPC URL (default: "http://localhost:8545")
    /// * `SECRET_STORE_URL` - Secret Store HTTP URL (default: "http://localhost:8082")
    /// * `CLIENT_TIMEOUT_SECS` - Request timeout in seconds (default: none)
    /// * `CLIENT_VERBOSE` - Log failed calls (default: true)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = match lookup("CLIENT_TIMEOUT_SECS") {
            Some(value) => Some(value.parse::<u64>()?),
            None => None,
        };
        let verbose = match lookup("CLIENT_VERBOSE") {
            Some(value) => value.parse::<bool>()?,
            None => defaults.verbose,
        };

        Ok(ClientConfig {
            rpc_url: lookup("PARITY_RPC_URL").unwrap_or(defaults.rpc_url),
            secret_store_url: lookup("SECRET_STORE_URL").unwrap_or(defaults.secret_store_url),
            timeout_secs,
            verbose,
        })
    }

    /// Per-request timeout for both transports, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the reqwest transports and all three facades
    ///
    /// Nothing is sent over the network here.
    pub fn connect(&self) -> Result<ParityClients> {
        let rpc = HttpRpcTransport::new(self.rpc_url.as_str(), self.timeout())?;
        let http = ReqwestHttpTransport::new(self.timeout())?;
        let sink = diagnostics::from_verbose(self.verbose);

        let rpc = Arc::new(rpc);
        Ok(ParityClients {
            secret_store: SecretStoreRpc::new(rpc.clone()).with_diagnostics(sink.clone()),
            sessions: SecretStoreSessions::new(http, self.secret_store_url.as_str())
                .with_diagnostics(sink.clone()),
            private: PrivateTransactions::new(rpc).with_diagnostics(sink),
        })
    }
}
