//! Contract entry points invoked by the workflows.

use alloy::primitives::{Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Opens the voting window and sets the ballot encryption key.
    function initialize_voting(uint256 start_time, uint256 end_time, uint256 encryption_key);

    /// Casts a ballot.
    function vote(uint256 voter, uint256 choice);
}

/// An encoded call to a named contract function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Function name as declared in the ABI.
    pub function: &'static str,
    /// Arguments in declaration order.
    pub args: Vec<U256>,
    /// Selector plus ABI-encoded arguments.
    pub calldata: Bytes,
}

impl ContractCall {
    pub fn initialize_voting(start_time: u64, end_time: u64, encryption_key: U256) -> Self {
        let call = initialize_votingCall {
            start_time: U256::from(start_time),
            end_time: U256::from(end_time),
            encryption_key,
        };
        Self {
            function: "initialize_voting",
            args: vec![call.start_time, call.end_time, call.encryption_key],
            calldata: call.abi_encode().into(),
        }
    }

    pub fn vote(voter: u64, choice: u64) -> Self {
        let call = voteCall {
            voter: U256::from(voter),
            choice: U256::from(choice),
        };
        Self {
            function: "vote",
            args: vec![call.voter, call.choice],
            calldata: call.abi_encode().into(),
        }
    }
}
