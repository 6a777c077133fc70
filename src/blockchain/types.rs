//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within expected time.
    #[error("Transaction not confirmed within {0} seconds")]
    ConfirmationTimeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// A deployment receipt carried no contract address.
    #[error("Deployment transaction {0} produced no contract address")]
    MissingContractAddress(TxHash),
}

/// Result type for blockchain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction was mined and reverted.
    Failed(String),
}

/// A contract created by a confirmed deployment transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Outcome of a confirmed contract invocation, reported as-is to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvokeReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ChainError::GasPriceTooHigh {
            current_gwei: 600,
            max_gwei: 500,
        };
        assert!(err.to_string().contains("600"));

        let err = ChainError::MissingContractAddress(TxHash::ZERO);
        assert!(err.to_string().contains("no contract address"));
    }

    #[test]
    fn test_receipt_serializes_hash_as_hex() {
        let receipt = InvokeReceipt {
            tx_hash: TxHash::repeat_byte(0xab),
            block_number: Some(7),
            gas_used: 21_000,
            success: true,
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert!(json["tx_hash"].as_str().unwrap().starts_with("0xabab"));
        assert_eq!(json["block_number"], 7);
        assert_eq!(json["success"], true);
    }
}
