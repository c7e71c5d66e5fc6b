//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, Bytes, B256, U256};
use clap::ValueEnum;
use contracts_common::types::ContractKind;
use serde::{Deserialize, Serialize};

use crate::{
    config::ChainConfig,
    constants::{ALL_TAG, DEFAULT_BLOCK_CONFIRMATIONS, DEVELOPMENT_CHAINS, FUND_ME_TAG, MOCKS_TAG},
    errors::ScriptError,
};

/// The network the scripts run against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    /// The network name, e.g. "hardhat" or "sepolia"
    pub name: String,
    /// The chain id of the network
    pub chain_id: u64,
    /// The chain config registered for `chain_id`, if any
    pub config: Option<ChainConfig>,
}

impl Network {
    /// Whether this is a development network, on which mocks are deployed
    pub fn is_development(&self) -> bool {
        DEVELOPMENT_CHAINS.contains(&self.name.as_str())
    }

    /// The number of confirmations to wait for after deploying
    pub fn block_confirmations(&self) -> u64 {
        self.config
            .as_ref()
            .and_then(|config| config.block_confirmations)
            .unwrap_or(DEFAULT_BLOCK_CONFIRMATIONS)
    }

    /// The Chainlink ETH / USD price feed configured for the chain
    pub fn price_feed(&self) -> Result<Address, ScriptError> {
        self.config
            .as_ref()
            .map(|config| config.eth_usd_price_feed)
            .ok_or(ScriptError::MissingNetworkConfig(self.chain_id))
    }
}

/// The accounts the deploy scripts act as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedAccounts {
    /// The account deploying, and thereby owning, the contracts
    pub deployer: Address,
    /// A second account, used to interact as a non-owner
    pub user: Address,
}

/// Options for a single contract deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployOptions {
    /// The deploying account
    pub from: Address,
    /// The ABI-encoded constructor arguments
    pub args: Vec<u8>,
    /// Whether to log the deployment
    pub log: bool,
    /// The number of confirmations to wait for
    pub wait_confirmations: u64,
}

/// A record of a deployed contract, as persisted to `deployments/<network>/<Contract>.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// The address of the contract
    pub address: Address,
    /// The hash of the deployment transaction
    pub transaction_hash: B256,
    /// The block the deployment was mined in
    pub block_number: u64,
    /// The gas used by the deployment
    pub gas_used: u64,
    /// The ABI-encoded constructor arguments
    pub args: Bytes,
    /// The hash of the creation bytecode, used to detect changed contracts
    pub bytecode_hash: B256,
    /// Whether the contract was deployed, rather than reused, in this run
    #[serde(skip)]
    pub newly_deployed: bool,
}

/// The outcome of a successful state-changing contract call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// The hash of the transaction
    pub transaction_hash: B256,
    /// The gas used by the transaction
    pub gas_used: u64,
    /// The price paid per unit of gas
    pub effective_gas_price: u128,
}

impl ExecutionReceipt {
    /// The total fee paid for the transaction
    pub fn gas_cost(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}

/// The deploy scripts, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployScript {
    /// Deploys the mock price feed on development networks
    Mocks,
    /// Deploys FundMe
    FundMe,
}

impl DeployScript {
    /// Every deploy script, in execution order
    pub const ALL: [DeployScript; 2] = [DeployScript::Mocks, DeployScript::FundMe];

    /// The tags selecting this script
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            DeployScript::Mocks => &[ALL_TAG, MOCKS_TAG],
            DeployScript::FundMe => &[ALL_TAG, FUND_ME_TAG],
        }
    }

    /// Whether any of `tags` selects this script
    pub fn matches<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.tags().contains(&tag.as_ref()))
    }
}

/// The contracts that can be named on the command line
#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum ContractArg {
    /// The FundMe contract
    FundMe,
    /// The mock price feed
    MockV3Aggregator,
}

impl From<ContractArg> for ContractKind {
    fn from(arg: ContractArg) -> Self {
        match arg {
            ContractArg::FundMe => ContractKind::FundMe,
            ContractArg::MockV3Aggregator => ContractKind::MockV3Aggregator,
        }
    }
}

impl Display for ContractArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ContractKind::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::{DeployScript, Network};
    use crate::config::NetworkConfig;

    #[test]
    fn test_deploy_script_tags() {
        assert!(DeployScript::Mocks.matches(&["all"]));
        assert!(DeployScript::Mocks.matches(&["mocks"]));
        assert!(!DeployScript::Mocks.matches(&["fundme"]));
        assert!(DeployScript::FundMe.matches(&["fundme", "other"]));
        assert!(!DeployScript::FundMe.matches::<&str>(&[]));
    }

    #[test]
    fn test_block_confirmations() {
        let config = NetworkConfig::builtin();

        let sepolia = config.network("sepolia", 11155111);
        assert!(!sepolia.is_development());
        assert_eq!(sepolia.block_confirmations(), 6);

        let hardhat: Network = config.network("hardhat", 31337);
        assert!(hardhat.is_development());
        assert_eq!(hardhat.block_confirmations(), 1);
    }
}
