//! Per-chain configuration: the price feed to wire FundMe to on each network

use std::{collections::BTreeMap, path::Path};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{
        GOERLI_CHAIN_ID, GOERLI_ETH_USD_PRICE_FEED, POLYGON_CHAIN_ID, POLYGON_ETH_USD_PRICE_FEED,
        PUBLIC_NETWORK_BLOCK_CONFIRMATIONS, RINKEBY_CHAIN_ID, RINKEBY_ETH_USD_PRICE_FEED,
        SEPOLIA_CHAIN_ID, SEPOLIA_ETH_USD_PRICE_FEED,
    },
    errors::ScriptError,
    types::Network,
    utils::read_json,
};

/// The configuration of a single public chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// A human-readable name for the chain
    pub name: String,
    /// The Chainlink ETH / USD price feed on the chain
    pub eth_usd_price_feed: Address,
    /// The number of confirmations to wait for after deploying
    #[serde(default)]
    pub block_confirmations: Option<u64>,
}

/// Chain configurations, keyed by chain id
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkConfig(BTreeMap<u64, ChainConfig>);

impl NetworkConfig {
    /// The built-in table of public chains
    pub fn builtin() -> Self {
        let public = |name: &str, eth_usd_price_feed| ChainConfig {
            name: name.to_string(),
            eth_usd_price_feed,
            block_confirmations: Some(PUBLIC_NETWORK_BLOCK_CONFIRMATIONS),
        };

        Self(BTreeMap::from([
            (RINKEBY_CHAIN_ID, public("rinkeby", RINKEBY_ETH_USD_PRICE_FEED)),
            (GOERLI_CHAIN_ID, public("goerli", GOERLI_ETH_USD_PRICE_FEED)),
            (POLYGON_CHAIN_ID, public("polygon", POLYGON_ETH_USD_PRICE_FEED)),
            (SEPOLIA_CHAIN_ID, public("sepolia", SEPOLIA_ETH_USD_PRICE_FEED)),
        ]))
    }

    /// The built-in table, extended & overridden by the JSON object at `path`,
    /// which maps chain ids to chain configs
    pub fn with_overrides(path: &Path) -> Result<Self, ScriptError> {
        let overrides: BTreeMap<u64, ChainConfig> = read_json(path)?;
        debug!("loaded {} chain config override(s) from {}", overrides.len(), path.display());

        let mut config = Self::builtin();
        config.0.extend(overrides);
        Ok(config)
    }

    /// The config registered for `chain_id`
    pub fn get(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.0.get(&chain_id)
    }

    /// Describe the network `name`, resolving its chain config
    pub fn network(&self, name: &str, chain_id: u64) -> Network {
        Network { name: name.to_string(), chain_id, config: self.get(chain_id).cloned() }
    }
}
