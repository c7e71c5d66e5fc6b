//! Deployments to the in-process "hardhat" development chain

use std::collections::HashMap;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use async_trait::async_trait;
use contracts_common::types::ContractKind;
use devnet::{constants::DEFAULT_ACCOUNTS, errors::DevnetError, DevnetClient};
use itertools::Itertools;
use tracing::{debug, info};

use super::Deployments;
use crate::{
    commands::run_deploy_scripts,
    config::NetworkConfig,
    constants::HARDHAT_NETWORK,
    errors::ScriptError,
    types::{DeployOptions, DeploymentRecord, ExecutionReceipt, NamedAccounts, Network},
};

/// Deployment records, by contract
type Records = HashMap<ContractKind, DeploymentRecord>;

/// A saved chain state, along with the deployments it holds
#[derive(Clone, Debug)]
struct Fixture {
    /// The devnet snapshot to revert to
    snapshot: u64,
    /// The deployments recorded when the snapshot was taken
    records: Records,
}

/// Deployments to an in-process devnet, kept in memory
#[derive(Debug)]
pub struct HardhatDeployments {
    /// A client of the devnet
    client: DevnetClient,
    /// The current deployments
    records: Records,
    /// Saved fixtures, by their sorted tags
    fixtures: HashMap<Vec<String>, Fixture>,
}

impl HardhatDeployments {
    /// Track deployments to the devnet `client` transacts with
    pub fn new(client: DevnetClient) -> Self {
        Self { client, records: HashMap::new(), fixtures: HashMap::new() }
    }

    /// Launch a fresh devnet to deploy to
    pub fn launch() -> Self {
        Self::new(DevnetClient::launch())
    }

    /// A client of the devnet
    pub fn client(&self) -> &DevnetClient {
        &self.client
    }

    /// The network description of the devnet
    pub async fn network(&self) -> Network {
        NetworkConfig::builtin().network(HARDHAT_NETWORK, self.client.chain_id().await)
    }

    /// The devnet's named accounts: the first two default accounts
    pub fn named_accounts(&self) -> NamedAccounts {
        NamedAccounts { deployer: DEFAULT_ACCOUNTS[0], user: DEFAULT_ACCOUNTS[1] }
    }

    /// Bring the devnet to the state reached by running the deploy scripts
    /// selected by `tags`.
    ///
    /// The first call for a set of tags runs the scripts and snapshots the
    /// result; subsequent calls revert to that snapshot. A fixture whose
    /// snapshot was consumed by reverting to an earlier one is rebuilt.
    pub async fn fixture<S: AsRef<str>>(&mut self, tags: &[S]) -> Result<(), ScriptError> {
        let key = tags.iter().map(|tag| tag.as_ref().to_string()).sorted().dedup().collect_vec();

        if let Some(fixture) = self.fixtures.remove(&key) {
            debug!("reverting to fixture {:?}", key);
            match self.client.revert(fixture.snapshot).await {
                Ok(()) => {
                    // Reverting consumes the snapshot and every later one
                    self.fixtures.retain(|_, cached| cached.snapshot < fixture.snapshot);
                    let snapshot = self.client.snapshot().await;
                    self.records = fixture.records.clone();
                    self.fixtures.insert(key, Fixture { snapshot, ..fixture });
                    return Ok(());
                }
                Err(DevnetError::UnknownSnapshot(id)) => {
                    debug!("snapshot {id} of fixture {:?} is gone, redeploying", key);
                }
                Err(e) => return Err(ScriptError::ContractInteraction(e.to_string())),
            }
        }

        let network = self.network().await;
        let accounts = self.named_accounts();
        run_deploy_scripts(self, key.as_slice(), &network, &accounts, None).await?;

        let snapshot = self.client.snapshot().await;
        self.fixtures.insert(key, Fixture { snapshot, records: self.records.clone() });
        Ok(())
    }
}

/// The stand-in for a contract's bytecode hash on the devnet
fn code_hash(contract: ContractKind) -> B256 {
    keccak256(contract.name())
}

#[async_trait]
impl Deployments for HardhatDeployments {
    async fn deploy(
        &mut self,
        contract: ContractKind,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError> {
        if let Some(existing) = self.records.get(&contract) {
            let unchanged = existing.args.as_ref() == options.args.as_slice()
                && self.client.code_at(existing.address).await == Some(contract);
            if unchanged {
                debug!("reusing {} at {}", contract, existing.address);
                return Ok(DeploymentRecord { newly_deployed: false, ..existing.clone() });
            }
        }

        let receipt = self
            .client
            .connect(options.from)
            .deploy(contract, options.args.clone())
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment("no contract address in receipt".to_string())
        })?;

        if options.log {
            info!(
                "deploying \"{}\" (tx: {}) deployed at {} with {} gas",
                contract, receipt.transaction_hash, address, receipt.gas_used
            );
        }

        let record = DeploymentRecord {
            address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            args: Bytes::from(options.args),
            bytecode_hash: code_hash(contract),
            newly_deployed: true,
        };
        self.records.insert(contract, record.clone());
        Ok(record)
    }

    async fn get(&self, contract: ContractKind) -> Result<DeploymentRecord, ScriptError> {
        self.records
            .get(&contract)
            .cloned()
            .ok_or_else(|| ScriptError::MissingDeployment(contract.to_string()))
    }

    async fn execute(
        &mut self,
        from: Address,
        contract: ContractKind,
        calldata: Vec<u8>,
        value: U256,
    ) -> Result<ExecutionReceipt, ScriptError> {
        let address = self.get(contract).await?.address;
        let receipt = self
            .client
            .connect(from)
            .send(address, calldata, value)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(ExecutionReceipt {
            transaction_hash: receipt.transaction_hash,
            gas_used: receipt.gas_used,
            effective_gas_price: receipt.effective_gas_price,
        })
    }

    async fn read(
        &self,
        contract: ContractKind,
        calldata: Vec<u8>,
    ) -> Result<Vec<u8>, ScriptError> {
        let address = self.get(contract).await?.address;
        self.client
            .call(address, calldata)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn balance(&self, account: Address) -> Result<U256, ScriptError> {
        Ok(self.client.get_balance(account).await)
    }
}
