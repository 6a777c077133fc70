//! Deployment records and their persistence.

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::workflow::window::VotingWindow;

/// Lifecycle stage captured by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    /// Deployed, `initialize_voting` not yet confirmed.
    Provisional,
    /// Deployed and initialized.
    Initialized,
}

/// Durable summary of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Lowercase, 0x-prefixed.
    pub contract_address: String,
    pub admin_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    pub network: String,
    #[serde(serialize_with = "serialize_iso8601", deserialize_with = "deserialize_iso8601")]
    /// Microsecond precision, matching the serialized form.
    pub timestamp: DateTime<Utc>,
    pub status: DeploymentStatus,
    pub deploy_tx_hash: String,
}

impl DeploymentRecord {
    /// Record written right after the deploy transaction confirms.
    pub fn provisional(
        contract: Address,
        admin: Address,
        deploy_tx_hash: TxHash,
        network: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            contract_address: normalize_address(contract),
            admin_address: normalize_address(admin),
            start_time: None,
            end_time: None,
            network: network.to_string(),
            timestamp: timestamp.trunc_subsecs(TIMESTAMP_DIGITS),
            status: DeploymentStatus::Provisional,
            deploy_tx_hash: format!("{:#x}", deploy_tx_hash),
        }
    }

    /// Final record for an initialized contract.
    pub fn initialized(mut self, window: VotingWindow, timestamp: DateTime<Utc>) -> Self {
        self.start_time = Some(window.start_time());
        self.end_time = Some(window.end_time());
        self.timestamp = timestamp.trunc_subsecs(TIMESTAMP_DIGITS);
        self.status = DeploymentStatus::Initialized;
        self
    }

    /// Parsed contract address.
    pub fn contract(&self) -> Result<Address, RecordError> {
        self.contract_address
            .parse()
            .map_err(|e| RecordError::Invalid(format!("contract_address: {}", e)))
    }
}

/// Fractional-second digits kept in `timestamp`.
const TIMESTAMP_DIGITS: u16 = 6;

/// Lowercase hex with the `0x` prefix.
pub fn normalize_address(address: Address) -> String {
    format!("{:#x}", address)
}

fn serialize_iso8601<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}

fn deserialize_iso8601<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access deployment record {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed deployment record {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid deployment record: {0}")]
    Invalid(String),
}

/// Durable storage for the deployment record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Replace the stored record.
    async fn save(&self, record: &DeploymentRecord) -> Result<(), RecordError>;

    async fn load(&self) -> Result<DeploymentRecord, RecordError>;

    /// Human-readable location, for logs and error messages.
    fn location(&self) -> String;
}

/// Pretty-printed JSON file, overwritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn save(&self, record: &DeploymentRecord) -> Result<(), RecordError> {
        let mut json = serde_json::to_vec_pretty(record).map_err(|source| RecordError::Format {
            path: self.path.clone(),
            source,
        })?;
        json.push(b'\n');

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| RecordError::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %self.path.display(),
            status = ?record.status,
            contract_address = %record.contract_address,
            "Deployment record saved"
        );
        Ok(())
    }

    async fn load(&self) -> Result<DeploymentRecord, RecordError> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RecordError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_slice(&content).map_err(|source| RecordError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
