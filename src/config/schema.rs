//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from `cloakvote.toml`.
//! Secrets are never part of the file; see [`crate::config::credentials`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CloakVoteConfig {
    /// Target network and RPC behaviour.
    pub network: NetworkConfig,

    /// Deployment workflow settings.
    pub deployment: DeploymentConfig,

    /// Identity provider used by the vote workflow.
    pub identity: IdentityRef,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network label written to the deployment record.
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (e.g., 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a transaction to confirm, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:5050";

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "testnet".to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 120,
            poll_interval_ms: 1000,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 100,
        }
    }
}

/// Where the encryption key passed to `initialize_voting` comes from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// Fresh random key from the OS RNG.
    #[default]
    Random,
    /// Operator-supplied key in `CLOAKVOTE_ENCRYPTION_KEY`.
    Env,
}

/// Deployment workflow configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Compiled contract artifact (JSON).
    pub artifact_path: PathBuf,

    /// Deployment record output file, overwritten on each run.
    pub record_path: PathBuf,

    /// Write a provisional record as soon as the contract is deployed.
    pub provisional_record: bool,

    /// Encryption key source.
    pub key_source: KeySource,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("target/dev/cloakvote.json"),
            record_path: PathBuf::from("deployment_info.json"),
            provisional_record: true,
            key_source: KeySource::Random,
        }
    }
}

/// Location of the identity provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IdentityRef {
    pub config_path: PathBuf,
}

impl Default for IdentityRef {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("identity.toml"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CloakVoteConfig::default();
        assert_eq!(config.network.name, "testnet");
        assert_eq!(config.network.rpc_url, "http://127.0.0.1:5050");
        assert_eq!(
            config.deployment.artifact_path,
            PathBuf::from("target/dev/cloakvote.json")
        );
        assert_eq!(config.deployment.record_path, PathBuf::from("deployment_info.json"));
        assert!(config.deployment.provisional_record);
        assert_eq!(config.deployment.key_source, KeySource::Random);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CloakVoteConfig = toml::from_str(
            r#"
            [network]
            chain_id = 11155111
            name = "sepolia"

            [deployment]
            key_source = "env"
            "#,
        )
        .unwrap();

        assert_eq!(config.network.chain_id, 11155111);
        assert_eq!(config.network.name, "sepolia");
        assert_eq!(config.network.rpc_timeout_secs, 10);
        assert_eq!(config.deployment.key_source, KeySource::Env);
        assert_eq!(config.observability.log_level, "info");
    }
}
