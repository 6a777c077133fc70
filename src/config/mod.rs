//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! cloakvote.toml (optional) + CLOAKVOTE_RPC_URL
//!     → loader.rs (parse, env overrides)
//!     → validation.rs (semantic checks)
//!     → CloakVoteConfig (validated, immutable, read once per run)
//!
//! CLOAKVOTE_PRIVATE_KEY + CLOAKVOTE_ACCOUNT_ADDRESS
//!     → credentials.rs (required, never logged)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow running without a config file
//! - Secrets come from the environment only, never from the file
//! - Validation separates syntactic (serde) from semantic checks

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::Credentials;
pub use loader::{env_lookup, load_config, resolve_config, ConfigError};
pub use schema::{CloakVoteConfig, DeploymentConfig, KeySource, NetworkConfig};
