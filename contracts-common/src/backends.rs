//! "Backends" representing the execution environment a contract runs in.
//!
//! This abstraction exists so that the contract logic can be driven either by
//! a development chain or by mocks in unit tests.

use alloy_primitives::{Address, U256};

use crate::types::RoundData;

/// An error that occurs when a contract calls out to another account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The callee has no code, or not the code the caller expects
    NoCode(Address),
    /// The caller does not hold the value it attempted to send
    InsufficientBalance,
    /// The callee reverted with the given data
    Reverted,
}

/// Encapsulates everything a contract can observe of, or do to, the chain it
/// executes on during a single call.
///
/// Storage is held by the contract itself; the host only meters it via
/// [`ContractHost::charge_gas`].
pub trait ContractHost {
    /// The immediate caller of the current call frame
    fn msg_sender(&self) -> Address;
    /// The value, in wei, sent along with the current call
    fn msg_value(&self) -> U256;
    /// The address of the executing contract
    fn contract_address(&self) -> Address;
    /// The timestamp of the block the call executes in
    fn block_timestamp(&self) -> U256;
    /// The balance of the given account
    fn balance(&self, account: Address) -> U256;
    /// Send `amount` wei from the executing contract to `to`
    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), CallError>;
    /// Call `latestRoundData` on the price feed at `feed`
    fn latest_round_data(&mut self, feed: Address) -> Result<RoundData, CallError>;
    /// Call `version` on the price feed at `feed`
    fn feed_version(&mut self, feed: Address) -> Result<U256, CallError>;
    /// Consume `gas` units of gas in the current call frame
    fn charge_gas(&mut self, gas: u64);
}
