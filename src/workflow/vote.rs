//! Single-vote interaction workflow.

use alloy::primitives::Address;

use crate::blockchain::calls::ContractCall;
use crate::blockchain::client::ChainClient;
use crate::blockchain::types::InvokeReceipt;
use crate::blockchain::wallet::Wallet;
use crate::workflow::error::WorkflowError;

/// Ballot parameters for one `vote` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteInvocation {
    pub voter_id: u64,
    pub choice: u64,
}

/// Submits one vote transaction. Calling it twice submits two transactions;
/// duplicate handling is up to the contract.
pub struct VoteWorkflow {
    client: Box<dyn ChainClient>,
    signer: Wallet,
}

impl VoteWorkflow {
    pub fn new(client: Box<dyn ChainClient>, signer: Wallet) -> Self {
        Self { client, signer }
    }

    /// Cast `invocation` on `contract` and return the receipt as reported.
    pub async fn run(
        &self,
        contract: Address,
        invocation: VoteInvocation,
    ) -> Result<InvokeReceipt, WorkflowError> {
        tracing::info!(
            contract = %contract,
            voter = %self.signer.address(),
            voter_id = invocation.voter_id,
            choice = invocation.choice,
            "Casting vote"
        );

        let call = ContractCall::vote(invocation.voter_id, invocation.choice);
        let receipt = self.client.invoke(contract, &call, &self.signer).await?;

        tracing::info!(
            tx_hash = %receipt.tx_hash,
            success = receipt.success,
            "Vote submitted"
        );
        Ok(receipt)
    }
}

/// Parse an operator-supplied contract address.
pub fn parse_contract_address(raw: &str) -> Result<Address, WorkflowError> {
    raw.trim()
        .parse()
        .map_err(|e| WorkflowError::Configuration(format!("invalid contract address '{}': {}", raw, e)))
}
