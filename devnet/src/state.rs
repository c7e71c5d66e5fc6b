//! The world state of the development chain

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use contracts_common::{backends::ContractHost, types::ContractKind};
use contracts_core::{
    fund_me::FundMe, mock_aggregator::MockV3Aggregator, CallResult, Contract,
};

use crate::errors::DevnetError;

/// A contract instance living at some address on the chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeployedContract {
    /// A FundMe instance
    FundMe(FundMe),
    /// A mock price feed
    MockV3Aggregator(MockV3Aggregator),
}

impl DeployedContract {
    /// The kind of contract deployed
    pub fn kind(&self) -> ContractKind {
        match self {
            DeployedContract::FundMe(_) => ContractKind::FundMe,
            DeployedContract::MockV3Aggregator(_) => ContractKind::MockV3Aggregator,
        }
    }

    /// Dispatch calldata to the underlying contract
    pub fn execute<H: ContractHost>(&mut self, host: &mut H, input: &[u8]) -> CallResult {
        match self {
            DeployedContract::FundMe(fund_me) => fund_me.execute(host, input),
            DeployedContract::MockV3Aggregator(aggregator) => aggregator.execute(host, input),
        }
    }
}

/// Balances, nonces, and code of every account, along with the chain head
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ChainState {
    /// Balances, in wei, by account
    pub balances: HashMap<Address, U256>,
    /// Transaction counts, by account
    pub nonces: HashMap<Address, u64>,
    /// Contract instances, by address
    pub contracts: HashMap<Address, DeployedContract>,
    /// The number of the latest block
    pub block_number: u64,
    /// The timestamp of the latest block
    pub timestamp: u64,
}

impl ChainState {
    /// The balance of `account`
    pub fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// The nonce of `account`
    pub fn nonce(&self, account: Address) -> u64 {
        self.nonces.get(&account).copied().unwrap_or_default()
    }

    /// Increment the nonce of `account`
    pub fn bump_nonce(&mut self, account: Address) {
        *self.nonces.entry(account).or_default() += 1;
    }

    /// Remove `amount` wei from `account`
    pub fn debit(&mut self, account: Address, amount: U256) -> Result<(), DevnetError> {
        let balance = self.balance(account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(DevnetError::InsufficientFunds { sender: account, required: amount })?;
        self.balances.insert(account, remaining);
        Ok(())
    }

    /// Add `amount` wei to `account`
    pub fn credit(&mut self, account: Address, amount: U256) {
        let balance = self.balance(account);
        self.balances.insert(account, balance.saturating_add(amount));
    }

    /// Move `amount` wei from `from` to `to`
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), DevnetError> {
        if amount.is_zero() {
            return Ok(());
        }

        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }
}
