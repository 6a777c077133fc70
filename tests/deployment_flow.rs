//! Deployment workflow against a recording chain client and a real record file.

use alloy::primitives::{Address, U256};
use cloakvote_deployer::config::{CloakVoteConfig, KeySource};
use cloakvote_deployer::workflow::{
    key_generator_for, DeploymentOptions, DeploymentStatus, DeploymentWorkflow, JsonFileStore,
    RecordStore, WorkflowError,
};

mod common;
use common::{FixedClock, Recorded, RecordingChainClient};

const T: i64 = 1_700_000_000;

fn contract() -> Address {
    "0xABC0000000000000000000000000000000000001".parse().unwrap()
}

fn workflow(
    client: RecordingChainClient,
    dir: &std::path::Path,
    provisional: bool,
) -> (DeploymentWorkflow, JsonFileStore) {
    let mut config = CloakVoteConfig::default();
    config.network.rpc_url = "http://localhost:5050".to_string();
    config.deployment.artifact_path = common::write_artifact(dir);
    config.deployment.record_path = dir.join("deployment_info.json");
    config.deployment.provisional_record = provisional;
    config.deployment.key_source = KeySource::Env;

    let keys = key_generator_for(KeySource::Env, |name| {
        (name == "CLOAKVOTE_ENCRYPTION_KEY").then(|| "123456789".to_string())
    });
    let store = JsonFileStore::new(config.deployment.record_path.clone());
    let options = DeploymentOptions::from_config(&config.deployment, &config.network.name);

    let workflow = DeploymentWorkflow::new(
        Box::new(client),
        common::test_wallet(),
        keys,
        Box::new(store.clone()),
        options,
    )
    .with_clock(Box::new(FixedClock(T)));
    (workflow, store)
}

#[tokio::test]
async fn test_end_to_end_deployment() {
    let dir = tempfile::tempdir().unwrap();
    let client = RecordingChainClient::deploying_to(contract());
    let (workflow, store) = workflow(client.clone(), dir.path(), true);

    let record = workflow.run().await.unwrap();

    let calls = client.recorded();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        Recorded::Deploy {
            constructor_args,
            signer,
            ..
        } => {
            assert_eq!(format!("{:#x}", signer), common::TEST_ADDRESS);
            assert_eq!(&constructor_args[12..], signer.as_slice());
        }
        other => panic!("expected deploy first, got {:?}", other),
    }
    match &calls[1] {
        Recorded::Invoke { contract: to, call, .. } => {
            assert_eq!(*to, contract());
            assert_eq!(call.function, "initialize_voting");
            assert_eq!(
                call.args,
                vec![
                    U256::from(T as u64),
                    U256::from(T as u64 + 86_400),
                    U256::from(123456789u64)
                ]
            );
        }
        other => panic!("expected initialize second, got {:?}", other),
    }

    let stored = store.load().await.unwrap();
    assert_eq!(stored, record);
    assert_eq!(stored.network, "testnet");
    assert_eq!(
        stored.contract_address,
        "0xabc0000000000000000000000000000000000001"
    );
    assert_eq!(stored.admin_address, common::TEST_ADDRESS);
    assert_eq!(stored.status, DeploymentStatus::Initialized);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["start_time"], T as u64);
    assert_eq!(raw["end_time"], T as u64 + 86_400);
    assert!(raw["timestamp"].as_str().unwrap().starts_with("2023-11-14T22:13:20"));
}

#[tokio::test]
async fn test_failed_deploy_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let client = RecordingChainClient::deploying_to(contract()).failing_deploy();
    let (workflow, store) = workflow(client.clone(), dir.path(), true);

    let err = workflow.run().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Network(_)));
    assert_eq!(client.recorded().len(), 1);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_failed_initialize_leaves_provisional_record() {
    let dir = tempfile::tempdir().unwrap();
    let client = RecordingChainClient::deploying_to(contract()).failing_invoke();
    let (workflow, store) = workflow(client.clone(), dir.path(), true);

    let err = workflow.run().await.unwrap_err();
    assert!(err.is_network());
    assert!(err.to_string().contains("0xabc0000000000000000000000000000000000001"));

    let stored = store.load().await.unwrap();
    assert_eq!(stored.status, DeploymentStatus::Provisional);
    assert_eq!(stored.start_time, None);
    assert_eq!(stored.contract().unwrap(), contract());
}

#[tokio::test]
async fn test_failed_initialize_without_provisional_record_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let client = RecordingChainClient::deploying_to(contract()).failing_invoke();
    let (workflow, store) = workflow(client.clone(), dir.path(), false);

    let err = workflow.run().await.unwrap_err();
    assert!(matches!(err, WorkflowError::PartialDeployment { record: None, .. }));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_rerun_overwrites_record() {
    let dir = tempfile::tempdir().unwrap();
    let first = RecordingChainClient::deploying_to(contract());
    let (workflow_a, store) = workflow(first, dir.path(), false);
    workflow_a.run().await.unwrap();

    let second_address: Address = "0x0000000000000000000000000000000000000002".parse().unwrap();
    let second = RecordingChainClient::deploying_to(second_address);
    let (workflow_b, _) = workflow(second, dir.path(), false);
    workflow_b.run().await.unwrap();

    assert_eq!(store.load().await.unwrap().contract().unwrap(), second_address);
}
