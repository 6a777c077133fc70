//! Shared utilities for workflow integration tests.

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::sync::{Arc, Mutex};

use cloakvote_deployer::blockchain::types::{ChainError, ChainResult};
use cloakvote_deployer::blockchain::{
    ChainClient, CompiledArtifact, ContractCall, DeployedContract, InvokeReceipt, Wallet,
};
use cloakvote_deployer::workflow::Clock;

// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// One call observed by [`RecordingChainClient`].
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Recorded {
    Deploy {
        bytecode: Bytes,
        constructor_args: Bytes,
        signer: Address,
    },
    Invoke {
        contract: Address,
        call: ContractCall,
        signer: Address,
    },
}

/// Programmable chain client that records every call in order.
#[derive(Clone)]
pub struct RecordingChainClient {
    pub calls: Arc<Mutex<Vec<Recorded>>>,
    deploy_address: Address,
    fail_deploy: bool,
    fail_invoke: bool,
}

#[allow(dead_code)]
impl RecordingChainClient {
    pub fn deploying_to(address: Address) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            deploy_address: address,
            fail_deploy: false,
            fail_invoke: false,
        }
    }

    pub fn failing_deploy(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    pub fn failing_invoke(mut self) -> Self {
        self.fail_invoke = true;
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for RecordingChainClient {
    async fn deploy(
        &self,
        artifact: &CompiledArtifact,
        constructor_args: Bytes,
        signer: &Wallet,
    ) -> ChainResult<DeployedContract> {
        self.calls.lock().unwrap().push(Recorded::Deploy {
            bytecode: artifact.bytecode.clone(),
            constructor_args,
            signer: signer.address(),
        });
        if self.fail_deploy {
            return Err(ChainError::Rpc("deploy rejected".to_string()));
        }
        Ok(DeployedContract {
            address: self.deploy_address,
            tx_hash: TxHash::repeat_byte(0x01),
            block_number: 1,
        })
    }

    async fn invoke(
        &self,
        contract: Address,
        call: &ContractCall,
        signer: &Wallet,
    ) -> ChainResult<InvokeReceipt> {
        self.calls.lock().unwrap().push(Recorded::Invoke {
            contract,
            call: call.clone(),
            signer: signer.address(),
        });
        if self.fail_invoke {
            return Err(ChainError::Timeout(10));
        }
        Ok(InvokeReceipt {
            tx_hash: TxHash::repeat_byte(0x02),
            block_number: Some(2),
            gas_used: 60_000,
            success: true,
        })
    }
}

/// Clock frozen at a unix timestamp.
#[allow(dead_code)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap()
    }
}

/// Minimal forge-style artifact declaring `initialize_voting`.
#[allow(dead_code)]
pub fn write_artifact(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("cloakvote.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
  "abi": [{{"type":"function","name":"initialize_voting","inputs":[
    {{"name":"start_time","type":"uint256"}},
    {{"name":"end_time","type":"uint256"}},
    {{"name":"encryption_key","type":"uint256"}}],
    "outputs":[],"stateMutability":"nonpayable"}}],
  "bytecode": {{"object": "0x6080604052348015600f57600080fd5b50"}}
}}"#
    )
    .unwrap();
    path
}

pub fn test_wallet() -> Wallet {
    Wallet::from_credentials(TEST_PRIVATE_KEY, TEST_ADDRESS, 31337).unwrap()
}
