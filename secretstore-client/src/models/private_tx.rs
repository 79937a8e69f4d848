//! Typed requests and responses of the private transactions API
//!
//! Transaction fields are passed through untouched; the node validates them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block tag every private transaction call is evaluated against
pub const LATEST_BLOCK: &str = "latest";

/// Gas price used for deployment when none is given
pub const DEFAULT_DEPLOYMENT_GAS_PRICE: &str = "0x0";

/// Transaction object with any subset of fields filled in
///
/// Used for `parity_composeTransaction` (the node fills the rest) and for
/// `private_call`. Only the common fields are named; anything else goes
/// through `extra` unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTransaction {
    /// Sender address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Recipient address; absent for contract creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Gas limit (hex quantity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,

    /// Gas price in wei (hex quantity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,

    /// Value transferred in wei (hex quantity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Transaction input data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Sender nonce (hex quantity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Any other transaction fields, sent as given
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for `private_composeDeploymentTransaction`
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    /// Signed raw deployment transaction of the private contract
    pub signed_transaction: String,
    /// Addresses allowed to validate the private contract's state changes
    pub validators: Vec<String>,
    /// Gas price for the public deployment transaction, `0x0` unless set
    pub gas_price: String,
}

impl DeploymentRequest {
    /// Create a deployment request with the default gas price
    ///
    /// # Arguments
    ///
    /// * `signed_transaction` - Signed raw deployment transaction
    /// * `validators` - Addresses of the private contract's validators
    ///
    /// # Returns
    ///
    /// * A request using [`DEFAULT_DEPLOYMENT_GAS_PRICE`]
    pub fn new(signed_transaction: impl Into<String>, validators: Vec<String>) -> Self {
        Self {
            signed_transaction: signed_transaction.into(),
            validators,
            gas_price: DEFAULT_DEPLOYMENT_GAS_PRICE.to_string(),
        }
    }

    /// Override the default gas price
    pub fn with_gas_price(mut self, gas_price: impl Into<String>) -> Self {
        self.gas_price = gas_price.into();
        self
    }
}

/// Receipt of a private transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateTransactionReceipt {
    #[serde(default, alias = "hash")]
    pub transaction_hash: Option<String>,

    /// Private contract address; known before the public transaction is broadcast
    #[serde(default)]
    pub contract_address: Option<String>,

    #[serde(default)]
    pub status: Option<u8>,
}

/// Result of `private_composeDeploymentTransaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentTransaction {
    pub receipt: PrivateTransactionReceipt,

    /// Public transaction wrapping the private deployment, still to be signed and sent
    pub transaction: Value,
}
