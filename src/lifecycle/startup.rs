//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn validated configuration into concrete collaborators
//! - Wire them into a workflow and run it inside a span tagged with a run ID
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Collaborators initialize in order, not concurrently
//! - The network is contacted only after credentials have been checked

use std::path::Path;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::client::RpcChainClient;
use crate::blockchain::types::InvokeReceipt;
use crate::config::{CloakVoteConfig, Credentials};
use crate::identity::IdentityProvider;
use crate::workflow::{
    key_generator_for, parse_contract_address, DeploymentOptions, DeploymentRecord,
    DeploymentStatus, DeploymentWorkflow, JsonFileStore, RecordStore, VoteInvocation,
    VoteWorkflow, WorkflowError,
};

/// Run the deployment workflow with credentials from `lookup`.
pub async fn deploy<F>(
    config: &CloakVoteConfig,
    lookup: F,
) -> Result<DeploymentRecord, WorkflowError>
where
    F: Fn(&str) -> Option<String>,
{
    let span = tracing::info_span!("deployment", run_id = %Uuid::new_v4());
    run_deployment(config, &lookup).instrument(span).await
}

async fn run_deployment<F>(
    config: &CloakVoteConfig,
    lookup: &F,
) -> Result<DeploymentRecord, WorkflowError>
where
    F: Fn(&str) -> Option<String>,
{
    let signer = Credentials::from_lookup(lookup)?.signer(config.network.chain_id)?;

    let client = RpcChainClient::connect(config.network.clone()).await?;
    let keys = key_generator_for(config.deployment.key_source, lookup);
    let store = JsonFileStore::new(config.deployment.record_path.clone());
    let options = DeploymentOptions::from_config(&config.deployment, &config.network.name);

    DeploymentWorkflow::new(Box::new(client), signer, keys, Box::new(store), options)
        .run()
        .await
}

/// Run the vote workflow.
///
/// Without an explicit `contract`, the address is taken from the deployment
/// record at `deployment.record_path`.
pub async fn vote<F>(
    config: &CloakVoteConfig,
    identity_path: &Path,
    contract: Option<&str>,
    invocation: VoteInvocation,
    lookup: F,
) -> Result<InvokeReceipt, WorkflowError>
where
    F: Fn(&str) -> Option<String>,
{
    let span = tracing::info_span!("vote", run_id = %Uuid::new_v4());
    run_vote(config, identity_path, contract, invocation, &lookup)
        .instrument(span)
        .await
}

async fn run_vote<F>(
    config: &CloakVoteConfig,
    identity_path: &Path,
    contract: Option<&str>,
    invocation: VoteInvocation,
    lookup: &F,
) -> Result<InvokeReceipt, WorkflowError>
where
    F: Fn(&str) -> Option<String>,
{
    let identity = IdentityProvider::init(identity_path, lookup).await?;
    let signer = identity.signer(config.network.chain_id)?;

    let contract = match contract {
        Some(raw) => parse_contract_address(raw)?,
        None => {
            let store = JsonFileStore::new(config.deployment.record_path.clone());
            recorded_contract(&store).await?
        }
    };

    let client = RpcChainClient::connect(config.network.clone()).await?;
    VoteWorkflow::new(Box::new(client), signer)
        .run(contract, invocation)
        .await
}

async fn recorded_contract(
    store: &dyn RecordStore,
) -> Result<alloy::primitives::Address, WorkflowError> {
    let record = store.load().await?;
    if record.status == DeploymentStatus::Provisional {
        tracing::warn!(
            contract_address = %record.contract_address,
            record = %store.location(),
            "Deployment record is provisional; the contract may not be initialized"
        );
    }
    Ok(record.contract()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::wallet::tests::{TEST_ADDRESS, TEST_PRIVATE_KEY};
    use crate::config::credentials::{ACCOUNT_ADDRESS_ENV_VAR, PRIVATE_KEY_ENV_VAR};

    #[tokio::test]
    async fn test_deploy_requires_credentials() {
        let err = deploy(&CloakVoteConfig::default(), |_| None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Configuration(ref m) if m.contains(PRIVATE_KEY_ENV_VAR)));
    }

    #[tokio::test]
    async fn test_deploy_rejects_mismatched_account() {
        let lookup = |name: &str| match name {
            PRIVATE_KEY_ENV_VAR => Some(TEST_PRIVATE_KEY.to_string()),
            ACCOUNT_ADDRESS_ENV_VAR => {
                Some("0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string())
            }
            _ => None,
        };
        let err = deploy(&CloakVoteConfig::default(), lookup).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Configuration(ref m) if m.contains("does not control")));
    }

    #[tokio::test]
    async fn test_vote_reads_contract_from_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("deployment_info.json"));
        let contract: alloy::primitives::Address =
            "0xdef0000000000000000000000000000000000456".parse().unwrap();
        let admin = TEST_ADDRESS.parse().unwrap();
        let record = DeploymentRecord::provisional(
            contract,
            admin,
            alloy::primitives::TxHash::ZERO,
            "testnet",
            chrono::Utc::now(),
        );
        store.save(&record).await.unwrap();

        assert_eq!(recorded_contract(&store).await.unwrap(), contract);
    }

    #[tokio::test]
    async fn test_vote_requires_identity_config() {
        let err = vote(
            &CloakVoteConfig::default(),
            Path::new("/nonexistent/identity.toml"),
            Some("0xdef0000000000000000000000000000000000456"),
            VoteInvocation {
                voter_id: 1,
                choice: 2,
            },
            |_| None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WorkflowError::FileAccess { .. }));
    }
}
