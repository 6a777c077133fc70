//! Operator workflows.
//!
//! # Data Flow
//! ```text
//! Deployment:
//!     artifact file → ChainClient::deploy → RecordStore (provisional)
//!     → VotingWindow + KeyGenerator → ChainClient::invoke(initialize_voting)
//!     → RecordStore (initialized)
//!
//! Interaction:
//!     IdentityProvider → Wallet → ChainClient::invoke(vote) → receipt
//! ```
//!
//! # Design Decisions
//! - External collaborators sit behind traits so runs can be replayed against mocks
//! - Each run owns its client, signer and store; nothing is shared between runs
//! - No retries: every error ends the run

pub mod deploy;
pub mod error;
pub mod keys;
pub mod record;
pub mod vote;
pub mod window;

pub use deploy::{DeploymentOptions, DeploymentWorkflow};
pub use error::WorkflowError;
pub use keys::{key_generator_for, KeyGenerator, OsRngKeyGenerator};
pub use record::{DeploymentRecord, DeploymentStatus, JsonFileStore, RecordStore};
pub use vote::{parse_contract_address, VoteInvocation, VoteWorkflow};
pub use window::{Clock, SystemClock, VotingWindow};
