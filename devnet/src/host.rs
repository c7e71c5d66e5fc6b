//! The execution environment handed to a contract for a single call

use alloy_primitives::{Address, U256};
use contracts_common::{
    backends::{CallError, ContractHost},
    constants::{SLOAD_GAS, STATIC_CALL_GAS},
    types::RoundData,
};

use crate::state::{ChainState, DeployedContract};

/// A [`ContractHost`] backed by the chain state.
///
/// The executing contract is expected to have been taken out of
/// `state.contracts` for the duration of the call.
pub(crate) struct ExecutionHost<'a> {
    /// The chain state the call executes against
    state: &'a mut ChainState,
    /// The caller
    sender: Address,
    /// The value sent with the call
    value: U256,
    /// The address of the executing contract
    contract: Address,
    /// The gas consumed so far
    gas_used: u64,
}

impl<'a> ExecutionHost<'a> {
    /// Create a host for a call from `sender` into `contract`
    pub fn new(state: &'a mut ChainState, sender: Address, value: U256, contract: Address) -> Self {
        Self { state, sender, value, contract, gas_used: 0 }
    }

    /// The gas consumed by the call
    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Look up the mock aggregator at `feed`, charging for the external call
    fn price_feed(&mut self, feed: Address) -> Result<&DeployedContract, CallError> {
        self.gas_used += STATIC_CALL_GAS + SLOAD_GAS;
        match self.state.contracts.get(&feed) {
            Some(contract @ DeployedContract::MockV3Aggregator(_)) => Ok(contract),
            _ => Err(CallError::NoCode(feed)),
        }
    }
}

impl ContractHost for ExecutionHost<'_> {
    fn msg_sender(&self) -> Address {
        self.sender
    }

    fn msg_value(&self) -> U256 {
        self.value
    }

    fn contract_address(&self) -> Address {
        self.contract
    }

    fn block_timestamp(&self) -> U256 {
        U256::from(self.state.timestamp)
    }

    fn balance(&self, account: Address) -> U256 {
        self.state.balance(account)
    }

    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), CallError> {
        self.state
            .transfer(self.contract, to, amount)
            .map_err(|_| CallError::InsufficientBalance)
    }

    fn latest_round_data(&mut self, feed: Address) -> Result<RoundData, CallError> {
        match self.price_feed(feed)? {
            DeployedContract::MockV3Aggregator(aggregator) => Ok(aggregator.latest_round_data()),
            _ => Err(CallError::NoCode(feed)),
        }
    }

    fn feed_version(&mut self, feed: Address) -> Result<U256, CallError> {
        match self.price_feed(feed)? {
            DeployedContract::MockV3Aggregator(aggregator) => Ok(aggregator.version()),
            _ => Err(CallError::NoCode(feed)),
        }
    }

    fn charge_gas(&mut self, gas: u64) {
        self.gas_used += gas;
    }
}
