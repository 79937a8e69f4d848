use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
    diagnostics::Diagnostics,
    error::ClientError,
    models::private_tx::{
        DeploymentRequest, DeploymentTransaction, PartialTransaction, PrivateTransactionReceipt, LATEST_BLOCK,
    },
    rpc::RpcClient,
    transport::RpcTransport,
};

/// Private transactions RPC facade
///
/// Composes, calls and broadcasts transactions of private contracts through a
/// node with the `private` RPC module enabled. Field shapes are checked by the
/// node, not here.
#[derive(Clone)]
pub struct PrivateTransactions<T> {
    client: RpcClient<T>,
}

impl<T: RpcTransport> PrivateTransactions<T> {
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

    /// Let the node fill in the missing fields (nonce, gas, gas price) of a public transaction
    #[instrument(skip_all)]
    pub async fn compose_transaction(
        &self,
        transaction: &PartialTransaction,
    ) -> Result<Map<String, Value>, ClientError> {
        let params = vec![to_param("parity_composeTransaction", transaction)?];
        self.client.call("parity_composeTransaction", params).await
    }

    /// Wrap a signed private deployment into a public transaction
    ///
    /// The receipt already carries the address the private contract will get.
    #[instrument(skip_all, fields(validators = request.validators.len()))]
    pub async fn compose_deployment_transaction(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentTransaction, ClientError> {
        let params = vec![
            Value::from(LATEST_BLOCK),
            Value::from(request.signed_transaction.as_str()),
            Value::from(request.validators.clone()),
            Value::from(request.gas_price.as_str()),
        ];
        self.client.call("private_composeDeploymentTransaction", params).await
    }

    /// Off-chain call against the private contract's decrypted state
    #[instrument(skip_all)]
    pub async fn call(&self, transaction: &PartialTransaction) -> Result<Value, ClientError> {
        let params = vec![Value::from(LATEST_BLOCK), to_param("private_call", transaction)?];
        self.client.call("private_call", params).await
    }

    /// Hand a signed private transaction to the validators
    #[instrument(skip_all)]
    pub async fn send_transaction(&self, signed_transaction: &str) -> Result<PrivateTransactionReceipt, ClientError> {
        self.client
            .call("private_sendTransaction", vec![Value::from(signed_transaction)])
            .await
    }

    /// ID of the Secret Store document key encrypting the contract's state
    #[instrument(skip_all)]
    pub async fn contract_key(&self, contract_address: &str) -> Result<String, ClientError> {
        self.client
            .call("private_contractKey", vec![Value::from(contract_address)])
            .await
    }
}

fn to_param(method: &str, transaction: &PartialTransaction) -> Result<Value, ClientError> {
    serde_json::to_value(transaction)
        .map_err(|e| ClientError::InvalidInput(format!("{} transaction cannot be encoded: {}", method, e)))
}
