//! A mock contract host for unit testing the contracts without a chain

use alloc::collections::BTreeMap;

use alloy_primitives::{address, Address, I256, U256};
use contracts_common::{
    backends::{CallError, ContractHost},
    constants::MOCK_INITIAL_ANSWER,
    types::RoundData,
};

/// A host which records balances and gas, and serves a fixed price feed answer
pub struct MockHost {
    /// The caller of the current frame
    pub sender: Address,
    /// The value sent with the current frame
    pub value: U256,
    /// The current block timestamp
    pub timestamp: U256,
    /// Account balances
    pub balances: BTreeMap<Address, U256>,
    /// The answer served by the feed at [`MockHost::FEED`]
    pub answer: I256,
    /// Whether value transfers out of the contract should fail
    pub fail_transfers: bool,
    /// The gas consumed so far
    pub gas_used: u64,
}

impl MockHost {
    /// The address of the executing contract
    pub const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    /// The address of the price feed
    pub const FEED: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
    /// The deployer of the contract
    pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    /// An account other than the owner
    pub const FUNDER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    /// Switch the caller & value of the next call, crediting the value to the contract
    pub fn call_from(&mut self, sender: Address, value: U256) {
        self.sender = sender;
        self.value = value;
        *self.balances.entry(Self::CONTRACT).or_default() += value;
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            sender: Self::OWNER,
            value: U256::ZERO,
            timestamp: U256::from(1u64),
            balances: BTreeMap::new(),
            answer: I256::try_from(MOCK_INITIAL_ANSWER).unwrap(),
            fail_transfers: false,
            gas_used: 0,
        }
    }
}

impl ContractHost for MockHost {
    fn msg_sender(&self) -> Address {
        self.sender
    }

    fn msg_value(&self) -> U256 {
        self.value
    }

    fn contract_address(&self) -> Address {
        Self::CONTRACT
    }

    fn block_timestamp(&self) -> U256 {
        self.timestamp
    }

    fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), CallError> {
        if self.fail_transfers {
            return Err(CallError::Reverted);
        }

        let from_balance = self.balances.entry(Self::CONTRACT).or_default();
        *from_balance = from_balance
            .checked_sub(amount)
            .ok_or(CallError::InsufficientBalance)?;
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn latest_round_data(&mut self, feed: Address) -> Result<RoundData, CallError> {
        if feed != Self::FEED {
            return Err(CallError::NoCode(feed));
        }

        Ok(RoundData {
            round_id: U256::from(1u64),
            answer: self.answer,
            started_at: self.timestamp,
            updated_at: self.timestamp,
            answered_in_round: U256::from(1u64),
        })
    }

    fn feed_version(&mut self, feed: Address) -> Result<U256, CallError> {
        if feed != Self::FEED {
            return Err(CallError::NoCode(feed));
        }
        Ok(U256::ZERO)
    }

    fn charge_gas(&mut self, gas: u64) {
        self.gas_used += gas;
    }
}
