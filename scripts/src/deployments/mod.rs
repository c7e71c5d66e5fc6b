//! The deployments facility: deploys contracts, reuses unchanged deployments,
//! and records where each contract lives on each network

use std::path::{Path, PathBuf};

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use contracts_common::types::ContractKind;

use crate::{
    constants::{CHAIN_ID_FILE, JSON_EXTENSION},
    errors::ScriptError,
    types::{DeployOptions, DeploymentRecord, ExecutionReceipt, Network},
    utils::{read_json, write_json},
};

mod hardhat;
mod rpc;

pub use hardhat::HardhatDeployments;
pub use rpc::RpcDeployments;

/// A network contracts can be deployed to & interacted with
#[async_trait]
pub trait Deployments: Send {
    /// Deploy `contract`, reusing an existing deployment if its code &
    /// constructor arguments are unchanged
    async fn deploy(
        &mut self,
        contract: ContractKind,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError>;

    /// The recorded deployment of `contract`
    async fn get(&self, contract: ContractKind) -> Result<DeploymentRecord, ScriptError>;

    /// Send a transaction from `from` calling the deployed `contract`
    async fn execute(
        &mut self,
        from: Address,
        contract: ContractKind,
        calldata: Vec<u8>,
        value: U256,
    ) -> Result<ExecutionReceipt, ScriptError>;

    /// Call a view method of the deployed `contract`
    async fn read(&self, contract: ContractKind, calldata: Vec<u8>) -> Result<Vec<u8>, ScriptError>;

    /// The balance of `account`
    async fn balance(&self, account: Address) -> Result<U256, ScriptError>;
}

// ----------------------
// | DEPLOYMENT RECORDS |
// ----------------------

/// The path of the deployment record for `contract` on `network`
pub fn record_path(deployments_dir: &Path, network: &str, contract: ContractKind) -> PathBuf {
    deployments_dir.join(network).join(format!("{}.{}", contract.name(), JSON_EXTENSION))
}

/// Read the deployment record for `contract` on `network`, if one exists
pub fn read_deployment_record(
    deployments_dir: &Path,
    network: &str,
    contract: ContractKind,
) -> Result<Option<DeploymentRecord>, ScriptError> {
    let path = record_path(deployments_dir, network, contract);
    if !path.exists() {
        return Ok(None);
    }

    read_json(&path).map(Some)
}

/// Persist the deployment record for `contract` on `network`
pub fn write_deployment_record(
    deployments_dir: &Path,
    network: &Network,
    contract: ContractKind,
    record: &DeploymentRecord,
) -> Result<(), ScriptError> {
    let network_dir = deployments_dir.join(&network.name);
    std::fs::create_dir_all(&network_dir).map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    std::fs::write(network_dir.join(CHAIN_ID_FILE), network.chain_id.to_string())
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    write_json(&record_path(deployments_dir, &network.name, contract), record)
}
