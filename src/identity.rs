//! Identity provider for the vote workflow.
//!
//! Initialisation is an explicit step that returns a handle; the handle is
//! passed to whoever needs a signer. The configuration file names where the
//! voter's key lives:
//!
//! ```toml
//! [signer]
//! private_key_env = "CLOAKVOTE_VOTER_PRIVATE_KEY"
//! account_address = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8" # optional check
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::blockchain::types::ChainError;
use crate::blockchain::wallet::Wallet;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to read identity config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed identity config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid identity config: {0}")]
    Invalid(String),

    #[error("Environment variable {0} not set")]
    MissingEnv(String),

    #[error(transparent)]
    Signer(#[from] ChainError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub signer: SignerConfig,
}

/// Exactly one of `private_key_env` or `private_key` must be set.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignerConfig {
    /// Environment variable holding the hex private key.
    pub private_key_env: Option<String>,
    /// Inline hex private key. Only for local development chains.
    pub private_key: Option<String>,
    /// When set, the key must control this account.
    pub account_address: Option<String>,
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key_env", &self.private_key_env)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("account_address", &self.account_address)
            .finish()
    }
}

/// Initialised identity provider handle.
pub struct IdentityProvider {
    private_key: String,
    account_address: Option<String>,
}

impl IdentityProvider {
    /// Read the configuration file and resolve the key it points to.
    pub async fn init<F>(path: &Path, lookup: F) -> Result<Self, IdentityError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IdentityError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config: IdentityConfig =
            toml::from_str(&content).map_err(|source| IdentityError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let provider = Self::from_config(config, lookup)?;
        tracing::info!(path = %path.display(), "Identity provider initialized");
        Ok(provider)
    }

    pub fn from_config<F>(config: IdentityConfig, lookup: F) -> Result<Self, IdentityError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signer = config.signer;
        let private_key = match (signer.private_key_env, signer.private_key) {
            (Some(var), None) => lookup(&var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(IdentityError::MissingEnv(var))?,
            (None, Some(key)) => {
                tracing::warn!("Identity config holds an inline private key");
                key
            }
            (Some(_), Some(_)) => {
                return Err(IdentityError::Invalid(
                    "set either signer.private_key_env or signer.private_key, not both".into(),
                ))
            }
            (None, None) => {
                return Err(IdentityError::Invalid(
                    "signer.private_key_env or signer.private_key is required".into(),
                ))
            }
        };

        Ok(Self {
            private_key,
            account_address: signer.account_address,
        })
    }

    /// Signer for transactions on `chain_id`.
    pub fn signer(&self, chain_id: u64) -> Result<Wallet, IdentityError> {
        let wallet = match &self.account_address {
            Some(account) => Wallet::from_credentials(&self.private_key, account, chain_id)?,
            None => Wallet::from_private_key(&self.private_key, chain_id)?,
        };
        Ok(wallet)
    }
}

impl std::fmt::Debug for IdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProvider")
            .field("account_address", &self.account_address)
            .finish_non_exhaustive()
    }
}
