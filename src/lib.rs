//! CloakVote deployment and interaction tooling.

pub mod blockchain;
pub mod config;
pub mod identity;
pub mod lifecycle;
pub mod observability;
pub mod workflow;

pub use config::schema::CloakVoteConfig;
pub use workflow::{DeploymentRecord, WorkflowError};
