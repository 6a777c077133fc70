//! Compiled contract artifacts.
//!
//! Accepts the JSON emitted by solc, forge and hardhat. `bytecode` may be a
//! plain hex string or an object with an `object` field.

use alloy::json_abi::{ContractObject, JsonAbi};
use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolValue;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Entry point every deployable artifact must expose.
pub const INITIALIZE_FUNCTION: &str = "initialize_voting";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Deployable contract: creation bytecode plus the optional ABI.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub abi: Option<JsonAbi>,
    pub bytecode: Bytes,
}

impl CompiledArtifact {
    /// Read and parse an artifact file.
    pub async fn load(path: &Path) -> Result<Self, ArtifactError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let artifact = Self::parse(&content).map_err(|message| ArtifactError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(
            path = %path.display(),
            bytecode_len = artifact.bytecode.len(),
            has_abi = artifact.abi.is_some(),
            "Artifact loaded"
        );
        Ok(artifact)
    }

    /// Parse artifact JSON.
    pub fn parse(content: &str) -> Result<Self, String> {
        let object: ContractObject = serde_json::from_str(content).map_err(|e| e.to_string())?;

        let bytecode = match object.bytecode {
            Some(code) if !code.is_empty() => code,
            _ => return Err("artifact has no creation bytecode".to_string()),
        };

        if let Some(abi) = &object.abi {
            if !abi.functions.contains_key(INITIALIZE_FUNCTION) {
                return Err(format!("ABI does not declare `{}`", INITIALIZE_FUNCTION));
            }
        }

        Ok(Self {
            abi: object.abi,
            bytecode,
        })
    }
}

/// ABI-encoded constructor arguments: the contract administrator.
pub fn admin_constructor_args(admin: Address) -> Bytes {
    Bytes::from(admin.abi_encode())
}
