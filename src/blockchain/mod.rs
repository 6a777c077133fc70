//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables / identity provider (private key)
//!     → wallet.rs (key loading, account check)
//! artifact file
//!     → artifact.rs (creation code, ABI check)
//! calls.rs (typed entry points: initialize_voting, vote)
//!     → client.rs (ChainClient seam, RPC with timeouts)
//!     → transaction.rs (build, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys never come from the config file
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod artifact;
pub mod calls;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use artifact::CompiledArtifact;
pub use calls::ContractCall;
pub use client::{ChainClient, RpcChainClient};
pub use types::{ChainError, ChainId, DeployedContract, InvokeReceipt};
pub use wallet::Wallet;
