//! Chain client seam and its JSON-RPC implementation.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and verify the chain
//! - Deploy creation code and invoke contract functions
//! - Bound every RPC request with the configured timeout

use alloy::consensus::TxEnvelope;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use async_trait::async_trait;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::artifact::CompiledArtifact;
use crate::blockchain::calls::ContractCall;
use crate::blockchain::transaction::TxBuilder;
use crate::blockchain::types::{
    ChainError, ChainId, ChainResult, ConfirmationStatus, DeployedContract, InvokeReceipt,
    NetworkConfig,
};
use crate::blockchain::wallet::Wallet;

/// Operations the workflows need from a chain.
///
/// Both methods wait for the transaction to be confirmed before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Deploy `artifact` with ABI-encoded `constructor_args`, signed by `signer`.
    async fn deploy(
        &self,
        artifact: &CompiledArtifact,
        constructor_args: Bytes,
        signer: &Wallet,
    ) -> ChainResult<DeployedContract>;

    /// Send `call` to `contract`, signed by `signer`.
    ///
    /// A mined but reverted transaction yields a receipt with `success == false`.
    async fn invoke(
        &self,
        contract: Address,
        call: &ContractCall,
        signer: &Wallet,
    ) -> ChainResult<InvokeReceipt>;
}

/// JSON-RPC chain client.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl RpcChainClient {
    /// Connect to the configured endpoint.
    ///
    /// An unreachable endpoint is tolerated here and surfaces on the first
    /// transaction; a reachable endpoint reporting another chain is fatal.
    pub async fn connect(config: NetworkConfig) -> ChainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider =
            Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        let client = Self {
            provider,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %client.config.rpc_url,
                    chain_id = client.config.chain_id,
                    network = %client.config.name,
                    "Chain client connected"
                );
            }
            Err(e @ ChainError::ChainMismatch { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client created but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    pub async fn get_block_number(&self) -> ChainResult<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    pub async fn get_transaction_count(&self, address: Address) -> ChainResult<u64> {
        self.request(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> ChainResult<u128> {
        self.request("eth_gasPrice", self.provider.get_gas_price())
            .await
    }

    pub async fn estimate_gas(&self, tx: TransactionRequest) -> ChainResult<u64> {
        self.request("eth_estimateGas", self.provider.estimate_gas(tx))
            .await
    }

    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        self.request(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Broadcast a signed envelope, returning its hash.
    pub async fn send_envelope(&self, envelope: TxEnvelope) -> ChainResult<TxHash> {
        let pending = self
            .request(
                "eth_sendRawTransaction",
                self.provider.send_tx_envelope(envelope),
            )
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    async fn request<T, E, F>(&self, method: &'static str, request: F) -> ChainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, request.into_future()).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(ChainError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(ChainError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn deploy(
        &self,
        artifact: &CompiledArtifact,
        constructor_args: Bytes,
        signer: &Wallet,
    ) -> ChainResult<DeployedContract> {
        let mut code = artifact.bytecode.to_vec();
        code.extend_from_slice(&constructor_args);

        let builder = TxBuilder::new(self, signer);
        let tx = builder.build(None, code.into()).await?;
        let tx_hash = builder.send(tx).await?;

        let (receipt, status) = builder.wait_for_confirmation(tx_hash).await?;
        let block_number = match status {
            ConfirmationStatus::Confirmed { block_number } => block_number,
            ConfirmationStatus::Failed(reason) => return Err(ChainError::Reverted(reason)),
            ConfirmationStatus::Confirming { .. } => {
                return Err(ChainError::ConfirmationTimeout(self.config.confirmation_timeout_secs))
            }
        };

        let address = receipt
            .contract_address
            .ok_or(ChainError::MissingContractAddress(tx_hash))?;

        Ok(DeployedContract {
            address,
            tx_hash,
            block_number,
        })
    }

    async fn invoke(
        &self,
        contract: Address,
        call: &ContractCall,
        signer: &Wallet,
    ) -> ChainResult<InvokeReceipt> {
        tracing::debug!(contract = %contract, function = call.function, "Invoking contract");

        let builder = TxBuilder::new(self, signer);
        let tx = builder.build(Some(contract), call.calldata.clone()).await?;
        let tx_hash = builder.send(tx).await?;

        let (receipt, status) = builder.wait_for_confirmation(tx_hash).await?;

        Ok(InvokeReceipt {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: !matches!(status, ConfirmationStatus::Failed(_)),
        })
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> NetworkConfig {
        NetworkConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 2,
            ..NetworkConfig::default()
        }
    }

    #[tokio::test]
    async fn test_connect_tolerates_unreachable_endpoint() {
        let result = RpcChainClient::connect(test_config()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let err = RpcChainClient::connect(config).await.unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_reports_rpc_error() {
        let client = RpcChainClient::connect(test_config()).await.unwrap();
        let err = client.get_block_number().await.unwrap_err();
        assert!(matches!(err, ChainError::Rpc(_) | ChainError::Timeout(_)));
    }
}
