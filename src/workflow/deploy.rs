//! Deployment workflow.
//!
//! ```text
//! load artifact → generate key → deploy → [provisional record]
//!     → voting window → initialize_voting → final record
//! ```
//!
//! Every step runs sequentially and any failure ends the run. Once the
//! deploy transaction has confirmed, failures carry the contract address:
//! `PartialDeployment` when initialization fails, `UnrecordedDeployment` when
//! the record cannot be written. A failed provisional save stops the run
//! before `initialize_voting`.

use std::path::PathBuf;

use crate::blockchain::artifact::{admin_constructor_args, CompiledArtifact};
use crate::blockchain::calls::ContractCall;
use crate::blockchain::client::ChainClient;
use crate::blockchain::types::ChainError;
use crate::blockchain::wallet::Wallet;
use crate::config::schema::DeploymentConfig;
use crate::workflow::error::WorkflowError;
use crate::workflow::keys::KeyGenerator;
use crate::workflow::record::{normalize_address, DeploymentRecord, RecordError, RecordStore};
use crate::workflow::window::{Clock, SystemClock, VotingWindow};

/// Per-run deployment settings.
#[derive(Debug, Clone)]
pub struct DeploymentOptions {
    pub artifact_path: PathBuf,
    /// Network label written to the record.
    pub network: String,
    pub provisional_record: bool,
}

impl DeploymentOptions {
    pub fn from_config(deployment: &DeploymentConfig, network: &str) -> Self {
        Self {
            artifact_path: deployment.artifact_path.clone(),
            network: network.to_string(),
            provisional_record: deployment.provisional_record,
        }
    }
}

pub struct DeploymentWorkflow {
    client: Box<dyn ChainClient>,
    signer: Wallet,
    keys: Box<dyn KeyGenerator>,
    store: Box<dyn RecordStore>,
    clock: Box<dyn Clock>,
    options: DeploymentOptions,
}

impl DeploymentWorkflow {
    pub fn new(
        client: Box<dyn ChainClient>,
        signer: Wallet,
        keys: Box<dyn KeyGenerator>,
        store: Box<dyn RecordStore>,
        options: DeploymentOptions,
    ) -> Self {
        Self {
            client,
            signer,
            keys,
            store,
            clock: Box::new(SystemClock),
            options,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Deploy, initialize and record. Returns the persisted record.
    pub async fn run(&self) -> Result<DeploymentRecord, WorkflowError> {
        let artifact = CompiledArtifact::load(&self.options.artifact_path).await?;
        let encryption_key = self.keys.generate()?;

        let admin = self.signer.address();
        tracing::info!(
            admin = %admin,
            network = %self.options.network,
            artifact = %self.options.artifact_path.display(),
            "Deploying contract"
        );

        let deployed = self
            .client
            .deploy(&artifact, admin_constructor_args(admin), &self.signer)
            .await?;
        drop(artifact);

        let contract_address = normalize_address(deployed.address);
        tracing::info!(
            contract_address = %contract_address,
            tx_hash = %deployed.tx_hash,
            block_number = deployed.block_number,
            "Contract deployed"
        );

        let record = DeploymentRecord::provisional(
            deployed.address,
            admin,
            deployed.tx_hash,
            &self.options.network,
            self.clock.now(),
        );

        let provisional_location = if self.options.provisional_record {
            self.store
                .save(&record)
                .await
                .map_err(|e| record_failed(&contract_address, false, e))?;
            Some(self.store.location())
        } else {
            None
        };

        let window = VotingWindow::from_clock(&*self.clock);
        tracing::info!(
            start_time = window.start_time(),
            end_time = window.end_time(),
            "Initializing voting parameters"
        );

        let call = ContractCall::initialize_voting(
            window.start_time(),
            window.end_time(),
            encryption_key,
        );
        let receipt = self
            .client
            .invoke(deployed.address, &call, &self.signer)
            .await
            .map_err(|source| WorkflowError::PartialDeployment {
                contract_address: contract_address.clone(),
                record: provisional_location.clone(),
                source,
            })?;

        if !receipt.success {
            return Err(WorkflowError::PartialDeployment {
                contract_address,
                record: provisional_location,
                source: ChainError::Reverted(format!(
                    "initialize_voting transaction {} reverted",
                    receipt.tx_hash
                )),
            });
        }

        let record = record.initialized(window, self.clock.now());
        self.store
            .save(&record)
            .await
            .map_err(|e| record_failed(&contract_address, true, e))?;

        tracing::info!(
            contract_address = %record.contract_address,
            record = %self.store.location(),
            "Contract initialized"
        );
        Ok(record)
    }
}

/// Record persistence failed after the contract went on-chain.
fn record_failed(contract_address: &str, initialized: bool, source: RecordError) -> WorkflowError {
    tracing::error!(
        contract_address = %contract_address,
        initialized,
        error = %source,
        "Failed to persist deployment record"
    );
    WorkflowError::UnrecordedDeployment {
        contract_address: contract_address.to_string(),
        initialized,
        source,
    }
}
