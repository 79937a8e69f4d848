//! Secret Store facades
//!
//! [`SecretStoreRpc`] goes through a Parity node's `secretstore` RPC module,
//! [`SecretStoreSessions`] talks to a key server's HTTP listener directly.

mod rpc;
mod session;

pub use rpc::SecretStoreRpc;
pub use session::SecretStoreSessions;
