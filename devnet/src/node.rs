//! The development chain itself: executes transactions, mines one block per
//! transaction, and supports snapshotting & reverting its state

use alloy_primitives::{keccak256, Address, B256, I256, U256};
use alloy_sol_types::SolValue;
use contracts_common::{
    constants::{CALLDATA_NONZERO_BYTE_GAS, CALLDATA_ZERO_BYTE_GAS, TX_BASE_GAS, TX_CREATE_GAS},
    types::ContractKind,
};
use contracts_core::{fund_me::FundMe, mock_aggregator::MockV3Aggregator};
use tracing::{debug, info};

use crate::{
    constants::{
        BLOCK_TIME_SECS, DEFAULT_ACCOUNTS, DEFAULT_ACCOUNT_BALANCE, DEFAULT_GAS_PRICE,
        DEVNET_CHAIN_ID, GENESIS_TIMESTAMP,
    },
    errors::DevnetError,
    host::ExecutionHost,
    state::{ChainState, DeployedContract},
    types::{TransactionReceipt, TransactionRequest, TxKind},
};

/// The outcome of a successful call or creation
#[derive(Default)]
struct Execution {
    /// The data returned by the call
    output: Vec<u8>,
    /// The gas consumed by execution, excluding intrinsic gas
    gas_used: u64,
}

/// An automining development chain.
///
/// Transactions which revert are not mined: they leave no trace on the chain,
/// consume no gas, and do not bump the sender's nonce.
#[derive(Debug)]
pub struct Devnet {
    /// The current world state
    state: ChainState,
    /// Saved world states, in the order they were taken
    snapshots: Vec<(u64, ChainState)>,
    /// The id handed out to the next snapshot
    next_snapshot_id: u64,
    /// The gas price charged for every transaction
    gas_price: u128,
}

impl Default for Devnet {
    fn default() -> Self {
        Self::new()
    }
}

impl Devnet {
    /// Start a chain whose default accounts are each funded with 10 000 ETH
    pub fn new() -> Self {
        let mut state = ChainState { timestamp: GENESIS_TIMESTAMP, ..Default::default() };
        for account in DEFAULT_ACCOUNTS {
            state.credit(account, DEFAULT_ACCOUNT_BALANCE);
        }

        Self { state, snapshots: Vec::new(), next_snapshot_id: 1, gas_price: DEFAULT_GAS_PRICE }
    }

    // -----------
    // | GETTERS |
    // -----------

    /// The chain id
    pub fn chain_id(&self) -> u64 {
        DEVNET_CHAIN_ID
    }

    /// The number of the latest block
    pub fn block_number(&self) -> u64 {
        self.state.block_number
    }

    /// The balance of `account`
    pub fn balance(&self, account: Address) -> U256 {
        self.state.balance(account)
    }

    /// The nonce of `account`
    pub fn nonce(&self, account: Address) -> u64 {
        self.state.nonce(account)
    }

    /// The kind of contract deployed at `address`, if any
    pub fn code_at(&self, address: Address) -> Option<ContractKind> {
        self.state.contracts.get(&address).map(DeployedContract::kind)
    }

    // ----------------
    // | TRANSACTIONS |
    // ----------------

    /// Execute `tx` in a new block, returning its receipt.
    ///
    /// State changes are only committed if execution succeeds and the sender
    /// can pay for the gas used.
    pub fn send_transaction(
        &mut self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, DevnetError> {
        let mut pending = self.state.clone();
        pending.block_number += 1;
        pending.timestamp += BLOCK_TIME_SECS;

        let nonce = pending.nonce(tx.from);
        let (to, contract_address, outcome) = match tx.kind {
            TxKind::Call(to) => {
                (Some(to), None, execute_call(&mut pending, tx.from, to, tx.value, &tx.input))
            }
            TxKind::Create(contract) => {
                let address = tx.from.create(nonce);
                let outcome =
                    execute_create(&mut pending, tx.from, address, contract, tx.value, &tx.input);
                (None, Some(address), outcome)
            }
        };

        let execution =
            outcome.inspect_err(|e| debug!("transaction from {} failed: {e}", tx.from))?;
        let gas_used = intrinsic_gas(&tx) + execution.gas_used;
        let fee = U256::from(gas_used) * U256::from(self.gas_price);
        pending.debit(tx.from, fee)?;
        pending.bump_nonce(tx.from);

        let receipt = TransactionReceipt {
            transaction_hash: transaction_hash(tx.from, nonce, &tx.input),
            block_number: pending.block_number,
            from: tx.from,
            to,
            contract_address,
            gas_used,
            effective_gas_price: self.gas_price,
            output: execution.output,
        };

        self.state = pending;
        if let Some(address) = contract_address {
            info!("deployed contract at {address} in block {}", receipt.block_number);
        } else {
            debug!("mined {} in block {}", receipt.transaction_hash, receipt.block_number);
        }

        Ok(receipt)
    }

    /// Execute a read-only call against the contract at `to`, discarding any
    /// state changes it makes
    pub fn call(&self, from: Address, to: Address, input: &[u8]) -> Result<Vec<u8>, DevnetError> {
        if !self.state.contracts.contains_key(&to) {
            return Err(DevnetError::NoCode(to));
        }

        let mut scratch = self.state.clone();
        execute_call(&mut scratch, from, to, U256::ZERO, input).map(|execution| execution.output)
    }

    // -------------
    // | SNAPSHOTS |
    // -------------

    /// Save the current state, returning an id to revert to it by
    pub fn snapshot(&mut self) -> u64 {
        let id = self.next_snapshot_id;
        self.next_snapshot_id += 1;
        self.snapshots.push((id, self.state.clone()));
        id
    }

    /// Restore the state saved under `id`.
    ///
    /// The snapshot is consumed, along with any taken after it.
    pub fn revert(&mut self, id: u64) -> Result<(), DevnetError> {
        let idx = self
            .snapshots
            .iter()
            .position(|(snapshot_id, _)| *snapshot_id == id)
            .ok_or(DevnetError::UnknownSnapshot(id))?;

        let mut dropped = self.snapshots.split_off(idx);
        self.state = dropped.swap_remove(0).1;
        Ok(())
    }
}

// -----------
// | HELPERS |
// -----------

/// Send `value` from `from` to `to`, executing the contract at `to` if any
fn execute_call(
    state: &mut ChainState,
    from: Address,
    to: Address,
    value: U256,
    input: &[u8],
) -> Result<Execution, DevnetError> {
    state.transfer(from, to, value)?;
    let Some(mut contract) = state.contracts.remove(&to) else {
        return Ok(Execution::default());
    };

    let mut host = ExecutionHost::new(state, from, value, to);
    let result = contract.execute(&mut host, input);
    let gas_used = host.gas_used();
    state.contracts.insert(to, contract);

    let output = result.map_err(DevnetError::Reverted)?;
    Ok(Execution { output, gas_used })
}

/// Construct `contract` at `address` from its ABI-encoded constructor arguments
fn execute_create(
    state: &mut ChainState,
    from: Address,
    address: Address,
    contract: ContractKind,
    value: U256,
    constructor_args: &[u8],
) -> Result<Execution, DevnetError> {
    // Neither constructor is payable
    if !value.is_zero() {
        return Err(DevnetError::Reverted(Vec::new()));
    }

    let invalid_args =
        |e: alloy_sol_types::Error| DevnetError::InvalidConstructorArgs(e.to_string());
    let mut host = ExecutionHost::new(state, from, value, address);
    let deployed = match contract {
        ContractKind::FundMe => {
            let (price_feed,) =
                <(Address,)>::abi_decode_params(constructor_args).map_err(invalid_args)?;
            DeployedContract::FundMe(FundMe::new(&mut host, price_feed))
        }
        ContractKind::MockV3Aggregator => {
            let (decimals, initial_answer) =
                <(U256, I256)>::abi_decode_params(constructor_args).map_err(invalid_args)?;
            let decimals = u8::try_from(decimals).map_err(|_| {
                DevnetError::InvalidConstructorArgs(format!("decimals out of range: {decimals}"))
            })?;
            DeployedContract::MockV3Aggregator(MockV3Aggregator::new(
                &mut host,
                decimals,
                initial_answer,
            ))
        }
    };

    let gas_used = TX_CREATE_GAS + host.gas_used();
    state.contracts.insert(address, deployed);
    Ok(Execution { output: Vec::new(), gas_used })
}

/// The gas charged before execution: a flat base plus the cost of calldata
fn intrinsic_gas(tx: &TransactionRequest) -> u64 {
    let calldata_gas: u64 = tx
        .input
        .iter()
        .map(|byte| if *byte == 0 { CALLDATA_ZERO_BYTE_GAS } else { CALLDATA_NONZERO_BYTE_GAS })
        .sum();

    TX_BASE_GAS + calldata_gas
}

/// A unique hash for the transaction sent by `from` at `nonce`
fn transaction_hash(from: Address, nonce: u64, input: &[u8]) -> B256 {
    let mut preimage = Vec::with_capacity(20 + 8 + input.len());
    preimage.extend_from_slice(from.as_slice());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    preimage.extend_from_slice(input);
    keccak256(preimage)
}
