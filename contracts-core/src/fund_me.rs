//! The FundMe contract: collects ETH from funders above a minimum USD value,
//! and lets its owner withdraw everything collected.
//!
//! Storage is held in plain Rust collections. Every access to a value which
//! would live in contract storage is metered through the host, so that the
//! gas used by the two withdrawal variants reflects their storage access
//! patterns.

use alloc::{collections::BTreeMap, vec::Vec};

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolInterface, SolValue};
use contracts_common::{
    backends::ContractHost,
    constants::{
        CALL_VALUE_GAS, MEMORY_WORD_GAS, MINIMUM_USD, SLOAD_GAS, SSTORE_RESET_GAS, SSTORE_SET_GAS,
    },
    solidity::IFundMe::IFundMeCalls,
};

use crate::{errors::FundMeError, price_converter::get_conversion_rate, CallResult, Contract};

/// The state of a deployed FundMe contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FundMe {
    /// The deployer of the contract, immutable after construction
    owner: Address,
    /// The ETH / USD price feed consulted when funding
    price_feed: Address,
    /// Every `fund` caller since the last withdrawal, in call order
    funders: Vec<Address>,
    /// The total amount each funder has sent since the last withdrawal
    address_to_amount_funded: BTreeMap<Address, U256>,
}

impl FundMe {
    /// Construct the contract, recording the caller as its owner
    pub fn new<H: ContractHost>(host: &mut H, price_feed: Address) -> Self {
        host.charge_gas(SSTORE_SET_GAS);
        Self {
            owner: host.msg_sender(),
            price_feed,
            funders: Vec::new(),
            address_to_amount_funded: BTreeMap::new(),
        }
    }

    // ------------
    // | EXTERNAL |
    // ------------

    /// Fund the contract with the value sent along with the call
    pub fn fund<H: ContractHost>(&mut self, host: &mut H) -> Result<(), FundMeError> {
        let value = host.msg_value();
        let price_feed = self.load_price_feed(host);
        if get_conversion_rate(host, value, price_feed)? < MINIMUM_USD {
            return Err(FundMeError::InsufficientEth);
        }

        let sender = host.msg_sender();
        let previous = self.load_amount_funded(host, sender);
        let updated = previous
            .checked_add(value)
            .ok_or(FundMeError::ArithmeticOverflow)?;
        self.store_amount_funded(host, sender, previous, updated);
        self.push_funder(host, sender);

        Ok(())
    }

    /// Withdraw the full contract balance to the owner, resetting every funder.
    ///
    /// Reads the funder count and each funder from storage on every iteration.
    pub fn withdraw<H: ContractHost>(&mut self, host: &mut H) -> Result<(), FundMeError> {
        self.only_owner(host)?;

        let mut funder_index = 0;
        loop {
            host.charge_gas(SLOAD_GAS);
            if funder_index >= self.funders.len() {
                break;
            }

            host.charge_gas(SLOAD_GAS);
            let funder = self.funders[funder_index];
            self.reset_amount_funded(host, funder);
            funder_index += 1;
        }

        self.clear_funders(host);
        self.send_balance_to_owner(host)
    }

    /// Withdraw the full contract balance to the owner, resetting every funder.
    ///
    /// Copies the funders into memory once up front.
    pub fn cheaper_withdraw<H: ContractHost>(&mut self, host: &mut H) -> Result<(), FundMeError> {
        self.only_owner(host)?;

        let funders = self.load_funders(host);
        for funder in funders {
            self.reset_amount_funded(host, funder);
        }

        self.clear_funders(host);
        self.send_balance_to_owner(host)
    }

    /// The owner of the contract
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The funder at position `index` in the funders list
    pub fn get_funder<H: ContractHost>(
        &self,
        host: &mut H,
        index: U256,
    ) -> Result<Address, FundMeError> {
        host.charge_gas(SLOAD_GAS);
        let funder = usize::try_from(index)
            .ok()
            .and_then(|i| self.funders.get(i))
            .ok_or(FundMeError::FunderIndexOutOfBounds)?;

        host.charge_gas(SLOAD_GAS);
        Ok(*funder)
    }

    /// The total amount funded by `funder` since the last withdrawal
    pub fn get_address_to_amount_funded<H: ContractHost>(
        &self,
        host: &mut H,
        funder: Address,
    ) -> U256 {
        self.load_amount_funded(host, funder)
    }

    /// The version of the configured price feed
    pub fn get_version<H: ContractHost>(&self, host: &mut H) -> Result<U256, FundMeError> {
        let price_feed = self.load_price_feed(host);
        host.feed_version(price_feed)
            .map_err(FundMeError::PriceFeedCall)
    }

    /// The configured price feed
    pub fn get_price_feed<H: ContractHost>(&self, host: &mut H) -> Address {
        self.load_price_feed(host)
    }

    /// The number of entries in the funders list
    pub fn num_funders(&self) -> usize {
        self.funders.len()
    }

    // ------------
    // | INTERNAL |
    // ------------

    /// Revert unless the caller is the owner
    fn only_owner<H: ContractHost>(&self, host: &H) -> Result<(), FundMeError> {
        if host.msg_sender() != self.owner {
            return Err(FundMeError::NotOwner);
        }
        Ok(())
    }

    /// Send the entire contract balance to the owner
    fn send_balance_to_owner<H: ContractHost>(&self, host: &mut H) -> Result<(), FundMeError> {
        host.charge_gas(CALL_VALUE_GAS);
        let balance = host.balance(host.contract_address());
        host.transfer_value(self.owner, balance)
            .map_err(|_| FundMeError::TransferFailed)
    }

    /// Read the price feed address from storage
    fn load_price_feed<H: ContractHost>(&self, host: &mut H) -> Address {
        host.charge_gas(SLOAD_GAS);
        self.price_feed
    }

    /// Read a funder's amount from storage
    fn load_amount_funded<H: ContractHost>(&self, host: &mut H, funder: Address) -> U256 {
        host.charge_gas(SLOAD_GAS);
        self.address_to_amount_funded
            .get(&funder)
            .copied()
            .unwrap_or_default()
    }

    /// Write a funder's amount to storage
    fn store_amount_funded<H: ContractHost>(
        &mut self,
        host: &mut H,
        funder: Address,
        previous: U256,
        updated: U256,
    ) {
        host.charge_gas(sstore_gas(previous, updated));
        if updated.is_zero() {
            self.address_to_amount_funded.remove(&funder);
        } else {
            self.address_to_amount_funded.insert(funder, updated);
        }
    }

    /// Zero a funder's amount in storage
    fn reset_amount_funded<H: ContractHost>(&mut self, host: &mut H, funder: Address) {
        let previous = self
            .address_to_amount_funded
            .get(&funder)
            .copied()
            .unwrap_or_default();
        self.store_amount_funded(host, funder, previous, U256::ZERO);
    }

    /// Append a funder to the funders list in storage
    fn push_funder<H: ContractHost>(&mut self, host: &mut H, funder: Address) {
        host.charge_gas(SLOAD_GAS);
        let length_gas = if self.funders.is_empty() {
            SSTORE_SET_GAS
        } else {
            SSTORE_RESET_GAS
        };
        host.charge_gas(length_gas + SSTORE_SET_GAS);
        self.funders.push(funder);
    }

    /// Copy the funders list out of storage into memory
    fn load_funders<H: ContractHost>(&self, host: &mut H) -> Vec<Address> {
        let num_funders = self.funders.len() as u64;
        host.charge_gas(SLOAD_GAS + num_funders * (SLOAD_GAS + MEMORY_WORD_GAS));
        self.funders.clone()
    }

    /// Replace the funders list with an empty one, clearing its storage slots
    fn clear_funders<H: ContractHost>(&mut self, host: &mut H) {
        let num_funders = self.funders.len() as u64;
        host.charge_gas(SSTORE_RESET_GAS * (num_funders + 1));
        self.funders.clear();
    }
}

/// The gas charged for overwriting the storage value `previous` with `updated`
fn sstore_gas(previous: U256, updated: U256) -> u64 {
    if previous.is_zero() && !updated.is_zero() {
        SSTORE_SET_GAS
    } else {
        SSTORE_RESET_GAS
    }
}

impl Contract for FundMe {
    fn execute<H: ContractHost>(&mut self, host: &mut H, input: &[u8]) -> CallResult {
        // Calldata without a known selector hits `receive` / `fallback`, which fund
        let known_selector = input
            .get(..4)
            .and_then(|s| <[u8; 4]>::try_from(s).ok())
            .is_some_and(IFundMeCalls::valid_selector);
        if !known_selector {
            return self.fund(host).map(|()| Vec::new()).map_err(|e| e.revert_data());
        }

        let call = IFundMeCalls::abi_decode(input)
            .map_err(|_| FundMeError::InvalidCalldata.revert_data())?;

        let payable = matches!(call, IFundMeCalls::fund(_));
        if !payable && !host.msg_value().is_zero() {
            return Err(FundMeError::NonPayable.revert_data());
        }

        let res = match call {
            IFundMeCalls::fund(_) => self.fund(host).map(|()| Vec::new()),
            IFundMeCalls::withdraw(_) => self.withdraw(host).map(|()| Vec::new()),
            IFundMeCalls::cheaperWithdraw(_) => self.cheaper_withdraw(host).map(|()| Vec::new()),
            IFundMeCalls::getAddressToAmountFunded(call) => {
                Ok(self.get_address_to_amount_funded(host, call.funder).abi_encode())
            }
            IFundMeCalls::getVersion(_) => self.get_version(host).map(|v| v.abi_encode()),
            IFundMeCalls::getFunder(call) => {
                self.get_funder(host, call.index).map(|f| f.abi_encode())
            }
            IFundMeCalls::getOwner(_) => Ok(self.owner().abi_encode()),
            IFundMeCalls::getPriceFeed(_) => Ok(self.get_price_feed(host).abi_encode()),
            IFundMeCalls::MINIMUM_USD(_) => Ok(MINIMUM_USD.abi_encode()),
        };

        res.map_err(|e| e.revert_data())
    }
}
