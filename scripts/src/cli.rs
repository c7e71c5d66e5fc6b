//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::PathBuf;

use alloy::{primitives::utils::parse_ether, providers::Provider};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    commands::{amount_funded, fund, run_deploy_scripts, verify, withdraw},
    config::NetworkConfig,
    constants::{
        ALL_TAG, DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_DIR, DEFAULT_LOCALHOST_RPC_URL,
        HARDHAT_NETWORK, LOCALHOST_NETWORK,
    },
    deployments::{Deployments, HardhatDeployments, RpcDeployments},
    errors::ScriptError,
    types::{ContractArg, NamedAccounts, Network},
    utils::setup_client,
    verify::{ContractVerifier, EtherscanVerifier},
};

/// Deploy & manage the FundMe contract
#[derive(Parser)]
pub struct Cli {
    /// The network to run against. "hardhat" runs against an in-process
    /// development chain which lives only as long as the command
    #[arg(short, long, default_value = HARDHAT_NETWORK)]
    pub network: String,

    /// Network RPC URL, required for networks other than "hardhat"
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Private key of the deployer, required for networks other than "hardhat"
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Etherscan API key, enabling verification on public networks
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub etherscan_api_key: Option<String>,

    /// Path to the Hardhat artifacts directory
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Path to the directory deployment records are kept in
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_DIR)]
    pub deployments_dir: PathBuf,

    /// Path to a JSON file extending the built-in chain configs
    #[arg(long)]
    pub network_config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The commands the scripts can run
#[derive(Subcommand)]
pub enum Command {
    /// Run the deploy scripts
    Deploy(DeployArgs),
    /// Verify a deployed contract on Etherscan
    Verify(VerifyArgs),
    /// Fund the deployed FundMe contract
    Fund(FundArgs),
    /// Withdraw the funds held by the deployed FundMe contract
    Withdraw(WithdrawArgs),
}

/// Run the deploy scripts selected by the given tags
#[derive(Args)]
pub struct DeployArgs {
    /// Comma-separated deploy tags
    #[arg(short, long, value_delimiter = ',', default_value = ALL_TAG)]
    pub tags: Vec<String>,
}

/// Verify a deployed contract
#[derive(Args)]
pub struct VerifyArgs {
    /// The contract to verify
    #[arg(short, long)]
    pub contract: ContractArg,
}

/// Fund the FundMe contract
#[derive(Args)]
pub struct FundArgs {
    /// The amount to fund, in ETH
    #[arg(short, long, default_value = "0.1")]
    pub amount: String,
}

/// Withdraw from the FundMe contract
#[derive(Args)]
pub struct WithdrawArgs {
    /// Use `cheaperWithdraw` rather than `withdraw`
    #[arg(long)]
    pub cheaper: bool,
}

impl Cli {
    /// Execute the parsed command against the selected network
    pub async fn run(self) -> Result<(), ScriptError> {
        let network_config = match &self.network_config {
            Some(path) => NetworkConfig::with_overrides(path)?,
            None => NetworkConfig::builtin(),
        };

        if self.network == HARDHAT_NETWORK {
            let mut deployments = HardhatDeployments::launch();
            let network = deployments.network().await;
            let accounts = deployments.named_accounts();

            // Nothing survives the process, so deploy everything before interacting
            if !matches!(self.command, Command::Deploy(_)) {
                deployments.fixture(&[ALL_TAG]).await?;
            }

            return self.command.run(&mut deployments, &network, &accounts, None).await;
        }

        let rpc_url = match (&self.rpc_url, self.network.as_str()) {
            (Some(url), _) => url.clone(),
            (None, LOCALHOST_NETWORK) => DEFAULT_LOCALHOST_RPC_URL.to_string(),
            (None, _) => {
                return Err(ScriptError::ArgumentParsing(format!(
                    "--rpc-url is required for network {}",
                    self.network
                )))
            }
        };
        let priv_key = self.priv_key.as_deref().ok_or_else(|| {
            ScriptError::ArgumentParsing("--priv-key is required for RPC networks".to_string())
        })?;

        let (client, signer) = setup_client(priv_key, &rpc_url)?;
        let chain_id = client
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let network = network_config.network(&self.network, chain_id);
        info!("running against {} (chain id {})", network.name, network.chain_id);

        let artifacts = ArtifactStore::new(&self.artifacts);
        let verifier = self
            .etherscan_api_key
            .map(|api_key| EtherscanVerifier::new(api_key, chain_id, artifacts.clone()))
            .transpose()?;

        let mut deployments =
            RpcDeployments::new(client, signer, network.clone(), artifacts, self.deployments_dir);
        let accounts = deployments.named_accounts();
        self.command
            .run(
                &mut deployments,
                &network,
                &accounts,
                verifier.as_ref().map(|v| v as &dyn ContractVerifier),
            )
            .await
    }
}

impl Command {
    /// Execute the command against `deployments`
    pub async fn run<D: Deployments + ?Sized>(
        self,
        deployments: &mut D,
        network: &Network,
        accounts: &NamedAccounts,
        verifier: Option<&dyn ContractVerifier>,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                let tags = args.tags.as_slice();
                run_deploy_scripts(deployments, tags, network, accounts, verifier).await?;
            }
            Command::Verify(args) => {
                let verifier = verifier.ok_or_else(|| {
                    ScriptError::Verification("ETHERSCAN_API_KEY is not set".to_string())
                })?;
                verify(deployments, args.contract.into(), verifier).await?;
            }
            Command::Fund(args) => {
                let amount = parse_ether(&args.amount)
                    .map_err(|e| ScriptError::ArgumentParsing(e.to_string()))?;
                fund(deployments, accounts, amount).await?;
                let total = amount_funded(deployments, accounts.deployer).await?;
                info!("{} has funded {} wei in total", accounts.deployer, total);
            }
            Command::Withdraw(args) => {
                withdraw(deployments, accounts, args.cheaper).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn test_parse_deploy_tags() {
        let cli = Cli::try_parse_from(["scripts", "deploy", "--tags", "mocks,fundme"]).unwrap();

        assert_eq!(cli.network, "hardhat");
        match cli.command {
            Command::Deploy(args) => assert_eq!(args.tags, vec!["mocks", "fundme"]),
            _ => panic!("expected deploy command"),
        }
    }

    #[test]
    fn test_parse_withdraw_defaults() {
        let cli =
            Cli::try_parse_from(["scripts", "--network", "sepolia", "withdraw", "--cheaper"])
                .unwrap();

        assert_eq!(cli.network, "sepolia");
        assert!(matches!(cli.command, Command::Withdraw(args) if args.cheaper));
    }
}
