//! Data models used throughout the client
//!
//! Wire envelopes and the typed per-operation requests and responses.

// JSON-RPC protocol data structures
pub mod jsonrpc;
pub mod private_tx;
pub mod secretstore;
