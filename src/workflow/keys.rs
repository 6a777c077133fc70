//! Ballot encryption key sources.

use alloy::primitives::U256;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::config::schema::KeySource;

/// Variable read by [`EnvKeyGenerator`].
pub const ENCRYPTION_KEY_ENV_VAR: &str = "CLOAKVOTE_ENCRYPTION_KEY";

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("invalid encryption key: {0}")]
    Invalid(String),

    #[error("OS random number generator failed: {0}")]
    Rng(#[from] rand::Error),
}

/// Produces the key passed to `initialize_voting`.
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> Result<U256, KeyError>;
}

/// 256 bits from the operating system RNG. Zero is never returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngKeyGenerator;

impl KeyGenerator for OsRngKeyGenerator {
    fn generate(&self) -> Result<U256, KeyError> {
        let mut bytes = [0u8; 32];
        loop {
            OsRng.try_fill_bytes(&mut bytes)?;
            let key = U256::from_be_bytes(bytes);
            if !key.is_zero() {
                return Ok(key);
            }
        }
    }
}

/// Operator-supplied key, decimal or 0x-prefixed hex.
#[derive(Debug, Clone)]
pub struct EnvKeyGenerator {
    value: Option<String>,
}

impl EnvKeyGenerator {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            value: lookup(ENCRYPTION_KEY_ENV_VAR),
        }
    }
}

impl KeyGenerator for EnvKeyGenerator {
    fn generate(&self) -> Result<U256, KeyError> {
        let raw = self
            .value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(KeyError::MissingEnv(ENCRYPTION_KEY_ENV_VAR))?;

        let key = match raw.strip_prefix("0x") {
            Some(hex) => U256::from_str_radix(hex, 16),
            None => U256::from_str_radix(raw, 10),
        }
        .map_err(|e| KeyError::Invalid(e.to_string()))?;

        if key.is_zero() {
            return Err(KeyError::Invalid("key must be non-zero".to_string()));
        }
        Ok(key)
    }
}

/// Generator selected by `deployment.key_source`.
pub fn key_generator_for<F>(source: KeySource, lookup: F) -> Box<dyn KeyGenerator>
where
    F: Fn(&str) -> Option<String>,
{
    match source {
        KeySource::Random => Box::new(OsRngKeyGenerator),
        KeySource::Env => Box::new(EnvKeyGenerator::from_lookup(lookup)),
    }
}
