//! Type definitions for transactions against the development chain

use alloy_primitives::{Address, B256, U256};
use contracts_common::types::ContractKind;

/// What a transaction does once executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxKind {
    /// Call the account at the given address
    Call(Address),
    /// Create a new instance of the given contract
    Create(ContractKind),
}

/// A transaction to be executed against the development chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    /// The sender of the transaction
    pub from: Address,
    /// The call or creation to perform
    pub kind: TxKind,
    /// The value, in wei, sent along with the transaction
    pub value: U256,
    /// The calldata, or the ABI-encoded constructor arguments for a creation
    pub input: Vec<u8>,
}

impl TransactionRequest {
    /// A call to `to` with the given calldata and no value
    pub fn call(from: Address, to: Address, input: Vec<u8>) -> Self {
        Self {
            from,
            kind: TxKind::Call(to),
            value: U256::ZERO,
            input,
        }
    }

    /// A creation of `contract` with the given constructor arguments
    pub fn create(from: Address, contract: ContractKind, constructor_args: Vec<u8>) -> Self {
        Self {
            from,
            kind: TxKind::Create(contract),
            value: U256::ZERO,
            input: constructor_args,
        }
    }

    /// Attach `value` wei to the transaction
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// The receipt of a successfully executed transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// The hash of the transaction
    pub transaction_hash: B256,
    /// The block the transaction was mined in
    pub block_number: u64,
    /// The sender of the transaction
    pub from: Address,
    /// The recipient of the transaction, `None` for creations
    pub to: Option<Address>,
    /// The address of the created contract, for creations
    pub contract_address: Option<Address>,
    /// The gas used by the transaction
    pub gas_used: u64,
    /// The price paid per unit of gas
    pub effective_gas_price: u128,
    /// The data returned by the call
    pub output: Vec<u8>,
}

impl TransactionReceipt {
    /// The total fee paid by the sender, i.e. `gas_used * effective_gas_price`
    pub fn gas_cost(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}
