//! Implementations of the deploy scripts & the contract management commands

use alloy_primitives::{Address, I256, U256};
use alloy_sol_types::{SolCall, SolValue};
use contracts_common::{
    constants::{MOCK_DECIMALS, MOCK_INITIAL_ANSWER},
    solidity::IFundMe,
    types::ContractKind,
};
use tracing::{info, warn};

use crate::{
    constants::{LOG_SEPARATOR, MOCKS_DEPLOYED_MSG},
    deployments::Deployments,
    errors::ScriptError,
    types::{
        DeployOptions, DeployScript, DeploymentRecord, ExecutionReceipt, NamedAccounts, Network,
    },
    verify::ContractVerifier,
};

// ------------------
// | DEPLOY SCRIPTS |
// ------------------

/// Deploy a mock price feed, on development networks only
pub async fn deploy_mocks<D: Deployments + ?Sized>(
    deployments: &mut D,
    network: &Network,
    accounts: &NamedAccounts,
) -> Result<Option<DeploymentRecord>, ScriptError> {
    if !network.is_development() {
        return Ok(None);
    }

    info!("Local network detected! Deploying mocks...");
    let initial_answer = I256::try_from(MOCK_INITIAL_ANSWER)
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    let record = deployments
        .deploy(
            ContractKind::MockV3Aggregator,
            DeployOptions {
                from: accounts.deployer,
                args: (U256::from(MOCK_DECIMALS), initial_answer).abi_encode_params(),
                log: true,
                wait_confirmations: network.block_confirmations(),
            },
        )
        .await?;

    info!("{}", MOCKS_DEPLOYED_MSG);
    info!("{}", LOG_SEPARATOR);
    Ok(Some(record))
}

/// Deploy FundMe wired to the network's ETH / USD price feed, verifying it on
/// public networks when a verifier is configured.
///
/// Verification failures are logged, never returned.
pub async fn deploy_fund_me<D: Deployments + ?Sized>(
    deployments: &mut D,
    network: &Network,
    accounts: &NamedAccounts,
    verifier: Option<&dyn ContractVerifier>,
) -> Result<DeploymentRecord, ScriptError> {
    let price_feed = if network.is_development() {
        deployments.get(ContractKind::MockV3Aggregator).await?.address
    } else {
        network.price_feed()?
    };

    let args = (price_feed,).abi_encode_params();
    let record = deployments
        .deploy(
            ContractKind::FundMe,
            DeployOptions {
                from: accounts.deployer,
                args: args.clone(),
                log: true,
                wait_confirmations: network.block_confirmations(),
            },
        )
        .await?;

    if let (false, Some(verifier)) = (network.is_development(), verifier) {
        if let Err(e) = verifier.verify(ContractKind::FundMe, record.address, &args).await {
            warn!("{}", e);
        }
    }

    info!("{}", LOG_SEPARATOR);
    Ok(record)
}

/// Run, in order, every deploy script selected by `tags`
pub async fn run_deploy_scripts<D: Deployments + ?Sized, S: AsRef<str>>(
    deployments: &mut D,
    tags: &[S],
    network: &Network,
    accounts: &NamedAccounts,
    verifier: Option<&dyn ContractVerifier>,
) -> Result<Vec<DeploymentRecord>, ScriptError> {
    let mut records = Vec::new();
    for script in DeployScript::ALL.into_iter().filter(|script| script.matches(tags)) {
        let record = match script {
            DeployScript::Mocks => deploy_mocks(deployments, network, accounts).await?,
            DeployScript::FundMe => {
                Some(deploy_fund_me(deployments, network, accounts, verifier).await?)
            }
        };
        records.extend(record);
    }

    Ok(records)
}

// ------------
// | COMMANDS |
// ------------

/// Verify an already deployed contract with its recorded constructor arguments
pub async fn verify<D: Deployments + ?Sized>(
    deployments: &D,
    contract: ContractKind,
    verifier: &dyn ContractVerifier,
) -> Result<(), ScriptError> {
    let record = deployments.get(contract).await?;
    verifier.verify(contract, record.address, &record.args).await
}

/// Fund the deployed FundMe with `amount` wei, sent from `accounts.deployer`
pub async fn fund<D: Deployments + ?Sized>(
    deployments: &mut D,
    accounts: &NamedAccounts,
    amount: U256,
) -> Result<ExecutionReceipt, ScriptError> {
    info!("Funding contract...");
    let receipt = deployments
        .execute(
            accounts.deployer,
            ContractKind::FundMe,
            IFundMe::fundCall {}.abi_encode(),
            amount,
        )
        .await?;

    info!("Funded! (tx: {})", receipt.transaction_hash);
    Ok(receipt)
}

/// Withdraw everything funded to the owner, using `cheaperWithdraw` if `cheaper` is set
pub async fn withdraw<D: Deployments + ?Sized>(
    deployments: &mut D,
    accounts: &NamedAccounts,
    cheaper: bool,
) -> Result<ExecutionReceipt, ScriptError> {
    let fund_me = deployments.get(ContractKind::FundMe).await?.address;
    let balance = deployments.balance(fund_me).await?;
    info!("Withdrawing {} wei...", balance);

    let calldata = if cheaper {
        IFundMe::cheaperWithdrawCall {}.abi_encode()
    } else {
        IFundMe::withdrawCall {}.abi_encode()
    };
    let receipt = deployments
        .execute(accounts.deployer, ContractKind::FundMe, calldata, U256::ZERO)
        .await?;

    info!("Withdrawn! (tx: {}, gas used: {})", receipt.transaction_hash, receipt.gas_used);
    Ok(receipt)
}

/// The amount `funder` has sent to the deployed FundMe since the last withdrawal
pub async fn amount_funded<D: Deployments + ?Sized>(
    deployments: &D,
    funder: Address,
) -> Result<U256, ScriptError> {
    let ret = deployments
        .read(
            ContractKind::FundMe,
            IFundMe::getAddressToAmountFundedCall { funder }.abi_encode(),
        )
        .await?;

    U256::abi_decode(&ret).map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}
