//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, multipliers >= 1.0)
//! - Check the RPC endpoint is a usable URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CloakVoteConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::CloakVoteConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &CloakVoteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let network = &config.network;

    if network.name.trim().is_empty() {
        errors.push(ValidationError::new("network.name", "must not be empty"));
    }

    match url::Url::parse(&network.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "network.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("network.rpc_url", e.to_string())),
    }

    if network.chain_id == 0 {
        errors.push(ValidationError::new("network.chain_id", "must be non-zero"));
    }
    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be > 0"));
    }
    if network.confirmation_blocks == 0 {
        errors.push(ValidationError::new("network.confirmation_blocks", "must be > 0"));
    }
    if network.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.confirmation_timeout_secs",
            "must be > 0",
        ));
    }
    if network.poll_interval_ms == 0 {
        errors.push(ValidationError::new("network.poll_interval_ms", "must be > 0"));
    }
    if !(network.gas_price_multiplier >= 1.0) {
        errors.push(ValidationError::new(
            "network.gas_price_multiplier",
            "must be >= 1.0",
        ));
    }

    if config.deployment.artifact_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("deployment.artifact_path", "must not be empty"));
    }
    if config.deployment.record_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("deployment.record_path", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
