//! An async handle to a shared development chain, bound to a signing account

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use contracts_common::types::ContractKind;
use tokio::sync::Mutex;

use crate::{
    constants::DEFAULT_ACCOUNTS,
    errors::DevnetError,
    node::Devnet,
    types::{TransactionReceipt, TransactionRequest},
};

/// A development chain shared between clients
pub type SharedDevnet = Arc<Mutex<Devnet>>;

/// A client of the development chain, sending transactions as `signer`
#[derive(Clone, Debug)]
pub struct DevnetClient {
    /// The chain the client transacts with
    node: SharedDevnet,
    /// The account transactions are sent from
    signer: Address,
}

impl DevnetClient {
    /// Create a client of `node` sending transactions from `signer`
    pub fn new(node: SharedDevnet, signer: Address) -> Self {
        Self { node, signer }
    }

    /// Start a fresh chain, with a client signing as its first account
    pub fn launch() -> Self {
        Self::new(Arc::new(Mutex::new(Devnet::new())), DEFAULT_ACCOUNTS[0])
    }

    /// A client of the same chain, signing as `signer` instead
    pub fn connect(&self, signer: Address) -> Self {
        Self::new(self.node.clone(), signer)
    }

    /// The account this client sends transactions from
    pub fn signer(&self) -> Address {
        self.signer
    }

    /// The chain id
    pub async fn chain_id(&self) -> u64 {
        self.node.lock().await.chain_id()
    }

    /// The number of the latest block
    pub async fn block_number(&self) -> u64 {
        self.node.lock().await.block_number()
    }

    /// The balance of `address`
    pub async fn get_balance(&self, address: Address) -> U256 {
        self.node.lock().await.balance(address)
    }

    /// The kind of contract deployed at `address`, if any
    pub async fn code_at(&self, address: Address) -> Option<ContractKind> {
        self.node.lock().await.code_at(address)
    }

    /// Deploy `contract` with the given ABI-encoded constructor arguments
    pub async fn deploy(
        &self,
        contract: ContractKind,
        constructor_args: Vec<u8>,
    ) -> Result<TransactionReceipt, DevnetError> {
        let tx = TransactionRequest::create(self.signer, contract, constructor_args);
        self.node.lock().await.send_transaction(tx)
    }

    /// Send a transaction calling `to` with `input`, attaching `value` wei
    pub async fn send(
        &self,
        to: Address,
        input: Vec<u8>,
        value: U256,
    ) -> Result<TransactionReceipt, DevnetError> {
        let tx = TransactionRequest::call(self.signer, to, input).with_value(value);
        self.node.lock().await.send_transaction(tx)
    }

    /// Execute a read-only call against `to`
    pub async fn call(&self, to: Address, input: Vec<u8>) -> Result<Vec<u8>, DevnetError> {
        self.node.lock().await.call(self.signer, to, &input)
    }

    /// Save the chain state, returning an id to revert to it by
    pub async fn snapshot(&self) -> u64 {
        self.node.lock().await.snapshot()
    }

    /// Restore the chain state saved under `id`
    pub async fn revert(&self, id: u64) -> Result<(), DevnetError> {
        self.node.lock().await.revert(id)
    }
}
