//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build transactions with nonce sync and gas estimation
//! - Sign with the caller's wallet and broadcast
//! - Monitor confirmations

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::RpcChainClient;
use crate::blockchain::types::{ChainError, ChainResult, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;

/// Headroom applied on top of `eth_estimateGas`, in percent.
const GAS_LIMIT_BUFFER_PERCENT: u64 = 120;

/// Transaction builder bound to one client and one signer.
pub struct TxBuilder<'a> {
    client: &'a RpcChainClient,
    wallet: &'a Wallet,
}

impl<'a> TxBuilder<'a> {
    pub fn new(client: &'a RpcChainClient, wallet: &'a Wallet) -> Self {
        Self { client, wallet }
    }

    /// Build a transaction request with gas estimation.
    ///
    /// # Arguments
    /// * `to` - Destination address, `None` for contract creation
    /// * `data` - Call data, or creation code followed by constructor args
    pub async fn build(&self, to: Option<Address>, data: Bytes) -> ChainResult<TransactionRequest> {
        let from = self.wallet.address();

        // Get current nonce from chain and sync wallet
        let chain_nonce = self.client.get_transaction_count(from).await?;
        self.wallet.set_nonce(chain_nonce);

        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;

        let config = self.client.config();
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(ChainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }

        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;

        let nonce = self.wallet.get_and_increment_nonce();

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id());

        let mut tx = match to {
            Some(to) => tx.with_to(to).with_input(data),
            None => tx.with_deploy_code(data),
        };

        let estimated = self.client.estimate_gas(tx.clone()).await?;
        tx.set_gas_limit(estimated.saturating_mul(GAS_LIMIT_BUFFER_PERCENT) / 100);

        Ok(tx)
    }

    /// Sign a request with the wallet and broadcast it.
    pub async fn send(&self, tx: TransactionRequest) -> ChainResult<TxHash> {
        let envelope = tx
            .build(&self.wallet.ethereum_wallet())
            .await
            .map_err(|e| ChainError::Wallet(format!("Signing failed: {}", e)))?;

        let tx_hash = self.client.send_envelope(envelope).await?;
        tracing::info!(tx_hash = %tx_hash, "Transaction broadcast");
        Ok(tx_hash)
    }

    /// Wait for a transaction to reach the configured confirmation depth.
    ///
    /// Returns the receipt together with its final status. A reverted
    /// transaction is returned as `ConfirmationStatus::Failed`, not an error.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<(TransactionReceipt, ConfirmationStatus)> {
        let config = self.client.config();
        let required_confirmations = config.confirmation_blocks;
        let timeout_secs = config.confirmation_timeout_secs;
        let poll_interval = Duration::from_millis(config.poll_interval_ms);

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok((receipt, ConfirmationStatus::Failed("Transaction reverted".to_string())));
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                // The inclusion block counts as the first confirmation.
                let confirmations = current_block.saturating_sub(tx_block) as u32 + 1;

                if confirmations >= required_confirmations {
                    return Ok((
                        receipt,
                        ConfirmationStatus::Confirmed {
                            block_number: tx_block,
                        },
                    ));
                }

                let status = ConfirmationStatus::Confirming {
                    current: confirmations,
                    required: required_confirmations,
                };
                tracing::debug!(tx_hash = %tx_hash, status = ?status, "Waiting for confirmations");
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::ConfirmationTimeout(timeout_secs)),
        }
    }
}
