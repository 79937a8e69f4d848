//! Async client for the Parity Secret Store and Private Transactions APIs
//!
//! Every operation is a single request: a JSON-RPC call to a Parity node or an
//! HTTP session request to a Secret Store key server. Failures are never
//! retried; see [`error::ClientError`] for how outcomes are classified.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod private_tx;
pub mod rpc;
pub mod secretstore;
pub mod transport;

pub use client::ParityClients;
pub use config::ClientConfig;
pub use error::{ClientError, RpcError, SessionError, TransportError};
pub use private_tx::PrivateTransactions;
pub use secretstore::{SecretStoreRpc, SecretStoreSessions};
