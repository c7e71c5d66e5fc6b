//! Core smart contract functionality, defined agnostically of the chain executing it

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![no_std]

extern crate alloc;

pub mod errors;
pub mod fund_me;
pub mod mock_aggregator;
pub mod price_converter;

#[cfg(test)]
pub(crate) mod test_helpers;

use alloc::vec::Vec;
use contracts_common::backends::ContractHost;

/// The outcome of executing a call against a contract: the ABI-encoded
/// return data on success, or the ABI-encoded revert data on failure
pub type CallResult = Result<Vec<u8>, Vec<u8>>;

/// A contract which can be driven by raw calldata, as the EVM would
pub trait Contract {
    /// Route the given calldata to the matching external method
    fn execute<H: ContractHost>(&mut self, host: &mut H, input: &[u8]) -> CallResult;
}
