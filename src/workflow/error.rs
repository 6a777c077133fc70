//! Errors surfaced by the workflows.

use std::path::PathBuf;
use thiserror::Error;

use crate::blockchain::artifact::ArtifactError;
use crate::blockchain::types::ChainError;
use crate::config::loader::ConfigError;
use crate::identity::IdentityError;
use crate::workflow::keys::KeyError;
use crate::workflow::record::RecordError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("network error: {0}")]
    Network(#[from] ChainError),

    #[error("encryption key unavailable: {0}")]
    KeyGeneration(#[from] KeyError),

    /// The contract exists on-chain but `initialize_voting` did not succeed.
    #[error(
        "contract deployed at {contract_address} but initialization failed{}: {source}",
        record_hint(.record)
    )]
    PartialDeployment {
        contract_address: String,
        /// Location of the provisional record, when one was written.
        record: Option<String>,
        #[source]
        source: ChainError,
    },

    /// The contract exists on-chain but its record could not be written.
    #[error(
        "contract deployed at {contract_address} ({}) but its record was not saved: {source}",
        stage_hint(.initialized)
    )]
    UnrecordedDeployment {
        contract_address: String,
        /// Whether `initialize_voting` had already succeeded.
        initialized: bool,
        #[source]
        source: RecordError,
    },
}

fn record_hint(record: &Option<String>) -> String {
    match record {
        Some(location) => format!(" (provisional record at {})", location),
        None => String::new(),
    }
}

fn stage_hint(initialized: &bool) -> &'static str {
    if *initialized {
        "initialized"
    } else {
        "not initialized"
    }
}

impl WorkflowError {
    /// Address of a contract left on-chain by a failed run.
    pub fn orphaned_contract(&self) -> Option<&str> {
        match self {
            WorkflowError::PartialDeployment {
                contract_address, ..
            }
            | WorkflowError::UnrecordedDeployment {
                contract_address, ..
            } => Some(contract_address),
            _ => None,
        }
    }

    /// True for failures reported by the chain, including partial deployments.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            WorkflowError::Network(_) | WorkflowError::PartialDeployment { .. }
        )
    }
}

impl From<ConfigError> for WorkflowError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { path, source } => WorkflowError::FileAccess { path, source },
            ConfigError::Parse { path, source } => WorkflowError::Parse {
                path,
                message: source.to_string(),
            },
            other => WorkflowError::Configuration(other.to_string()),
        }
    }
}

impl From<ArtifactError> for WorkflowError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::Io { path, source } => WorkflowError::FileAccess { path, source },
            ArtifactError::Parse { path, message } => WorkflowError::Parse { path, message },
        }
    }
}

impl From<RecordError> for WorkflowError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Io { path, source } => WorkflowError::FileAccess { path, source },
            RecordError::Format { path, source } => WorkflowError::Parse {
                path,
                message: source.to_string(),
            },
            RecordError::Invalid(message) => WorkflowError::Parse {
                path: PathBuf::new(),
                message,
            },
        }
    }
}

impl From<IdentityError> for WorkflowError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Io { path, source } => WorkflowError::FileAccess { path, source },
            IdentityError::Parse { path, source } => WorkflowError::Parse {
                path,
                message: source.to_string(),
            },
            other => WorkflowError::Configuration(other.to_string()),
        }
    }
}
