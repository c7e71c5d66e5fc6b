//! Deployments to a live network over JSON-RPC, recorded on disk

use std::path::PathBuf;

use alloy::{
    network::TransactionBuilder,
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use alloy_primitives::{keccak256, Address, Bytes, U256};
use async_trait::async_trait;
use contracts_common::types::ContractKind;
use tracing::{debug, info};

use super::{read_deployment_record, write_deployment_record, Deployments};
use crate::{
    artifacts::ArtifactStore,
    errors::ScriptError,
    types::{DeployOptions, DeploymentRecord, ExecutionReceipt, NamedAccounts, Network},
    utils::RpcClient,
};

/// Deployments made with Hardhat artifacts through an RPC provider
#[derive(Clone)]
pub struct RpcDeployments {
    /// The provider, signing as the deployer
    client: RpcClient,
    /// The address of the signer
    signer: Address,
    /// The network deployed to
    network: Network,
    /// The compiled contracts
    artifacts: ArtifactStore,
    /// The root of the deployment records
    deployments_dir: PathBuf,
}

impl RpcDeployments {
    /// Deploy to `network` through `client`, which signs as `signer`
    pub fn new(
        client: RpcClient,
        signer: Address,
        network: Network,
        artifacts: ArtifactStore,
        deployments_dir: PathBuf,
    ) -> Self {
        Self { client, signer, network, artifacts, deployments_dir }
    }

    /// The named accounts on an RPC network all resolve to the signer
    pub fn named_accounts(&self) -> NamedAccounts {
        NamedAccounts { deployer: self.signer, user: self.signer }
    }

    /// Send `tx` and wait for `confirmations`, failing on a reverted receipt
    async fn send(
        &self,
        tx: TransactionRequest,
        confirmations: u64,
    ) -> Result<TransactionReceipt, ScriptError> {
        let pending = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        debug!(
            "sent transaction {}, waiting for {} confirmation(s)",
            pending.tx_hash(),
            confirmations
        );

        let receipt = pending
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractInteraction(format!(
                "transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        Ok(receipt)
    }
}

#[async_trait]
impl Deployments for RpcDeployments {
    async fn deploy(
        &mut self,
        contract: ContractKind,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError> {
        let artifact = self.artifacts.artifact(contract)?;
        let bytecode_hash = keccak256(&artifact.bytecode);

        let existing = read_deployment_record(&self.deployments_dir, &self.network.name, contract)?;
        if let Some(existing) = existing {
            let unchanged = existing.bytecode_hash == bytecode_hash
                && existing.args.as_ref() == options.args.as_slice();
            if unchanged {
                info!("reusing \"{}\" at {}", contract, existing.address);
                return Ok(existing);
            }
        }

        let mut deploy_code = artifact.bytecode.to_vec();
        deploy_code.extend_from_slice(&options.args);
        let tx = TransactionRequest::default()
            .with_from(options.from)
            .with_deploy_code(deploy_code);

        let receipt = self
            .send(tx, options.wait_confirmations)
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
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used: receipt.gas_used,
            args: Bytes::from(options.args),
            bytecode_hash,
            newly_deployed: true,
        };
        write_deployment_record(&self.deployments_dir, &self.network, contract, &record)?;
        Ok(record)
    }

    async fn get(&self, contract: ContractKind) -> Result<DeploymentRecord, ScriptError> {
        read_deployment_record(&self.deployments_dir, &self.network.name, contract)?
            .ok_or_else(|| {
                ScriptError::MissingDeployment(format!("{} on {}", contract, self.network.name))
            })
    }

    async fn execute(
        &mut self,
        from: Address,
        contract: ContractKind,
        calldata: Vec<u8>,
        value: U256,
    ) -> Result<ExecutionReceipt, ScriptError> {
        let address = self.get(contract).await?.address;
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(address)
            .with_input(calldata)
            .with_value(value);

        let receipt = self.send(tx, self.network.block_confirmations()).await?;
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
        let tx = TransactionRequest::default().with_to(address).with_input(calldata);

        self.client
            .call(tx)
            .await
            .map(|ret| ret.to_vec())
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn balance(&self, account: Address) -> Result<U256, ScriptError> {
        self.client
            .get_balance(account)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }
}
