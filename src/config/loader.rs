//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::CloakVoteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Optional path to the TOML configuration file.
pub const CONFIG_PATH_ENV_VAR: &str = "CLOAKVOTE_CONFIG";
/// Overrides `network.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "CLOAKVOTE_RPC_URL";
/// Read when `CLOAKVOTE_CONFIG` is unset and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "cloakvote.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file without semantic checks.
pub fn read_config(path: &Path) -> Result<CloakVoteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CloakVoteConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// File selection: `CLOAKVOTE_CONFIG` if set (must exist), else
/// `cloakvote.toml` if present, else built-in defaults. `CLOAKVOTE_RPC_URL`
/// then overrides the endpoint. The result is validated.
pub fn resolve_config<F>(lookup: F) -> Result<CloakVoteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(CONFIG_PATH_ENV_VAR) {
        Some(path) => read_config(Path::new(&path))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            read_config(Path::new(DEFAULT_CONFIG_PATH))?
        }
        None => CloakVoteConfig::default(),
    };

    if let Some(rpc_url) = lookup(RPC_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        config.network.rpc_url = rpc_url;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Process environment lookup for [`resolve_config`] and credentials.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
