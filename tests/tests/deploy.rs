use alloy_primitives::U256;
use contracts_common::types::ContractKind;
use eyre::Result;
use scripts::{
    commands::{deploy_fund_me, deploy_mocks, run_deploy_scripts},
    config::NetworkConfig,
    constants::SEPOLIA_ETH_USD_PRICE_FEED,
    deployments::Deployments,
    errors::ScriptError,
};
use tests::{
    fund_me::{FundMe, SEND_VALUE},
    utils::{global_setup, setup_fixture, MockVerifier},
};

#[tokio::test]
async fn test_fixture_deploys_everything() -> Result<()> {
    let deployments = setup_fixture().await?;
    let client = deployments.client();

    let mock = deployments.get(ContractKind::MockV3Aggregator).await?;
    let fund_me = deployments.get(ContractKind::FundMe).await?;

    assert_eq!(client.code_at(mock.address).await, Some(ContractKind::MockV3Aggregator));
    assert_eq!(client.code_at(fund_me.address).await, Some(ContractKind::FundMe));
    assert!(mock.block_number < fund_me.block_number);

    Ok(())
}

#[tokio::test]
async fn test_deploy_tags_select_scripts() -> Result<()> {
    let mut deployments = global_setup();
    let network = deployments.network().await;
    let accounts = deployments.named_accounts();

    let records =
        run_deploy_scripts(&mut deployments, &["mocks"], &network, &accounts, None).await?;
    assert_eq!(records.len(), 1);
    assert!(matches!(
        deployments.get(ContractKind::FundMe).await,
        Err(ScriptError::MissingDeployment(_))
    ));

    let records =
        run_deploy_scripts(&mut deployments, &["fundme"], &network, &accounts, None).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, deployments.get(ContractKind::FundMe).await?.address);

    // Unknown tags select nothing
    let records =
        run_deploy_scripts(&mut deployments, &["none"], &network, &accounts, None).await?;
    assert!(records.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_fund_me_requires_mock_on_development_network() -> Result<()> {
    let mut deployments = global_setup();
    let network = deployments.network().await;
    let accounts = deployments.named_accounts();

    let res = deploy_fund_me(&mut deployments, &network, &accounts, None).await;
    assert!(matches!(res, Err(ScriptError::MissingDeployment(_))));

    Ok(())
}

#[tokio::test]
async fn test_unchanged_deployments_are_reused() -> Result<()> {
    let mut deployments = setup_fixture().await?;
    let network = deployments.network().await;
    let accounts = deployments.named_accounts();
    let original = deployments.get(ContractKind::FundMe).await?;

    let redeployed = deploy_fund_me(&mut deployments, &network, &accounts, None).await?;

    assert!(!redeployed.newly_deployed);
    assert_eq!(redeployed.address, original.address);

    Ok(())
}

#[tokio::test]
async fn test_fixture_resets_state() -> Result<()> {
    let mut deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let deployer = deployments.named_accounts().deployer;
    fund_me.fund(SEND_VALUE).await?;
    assert_eq!(fund_me.balance().await, SEND_VALUE);

    deployments.fixture(&["all"]).await?;
    let reset = FundMe::deployed(&deployments).await?;

    assert_eq!(reset.address(), fund_me.address());
    assert_eq!(reset.balance().await, U256::ZERO);
    assert_eq!(reset.get_address_to_amount_funded(deployer).await?, U256::ZERO);

    // The fixture can be reverted to repeatedly
    reset.fund(SEND_VALUE).await?;
    deployments.fixture(&["all"]).await?;
    assert_eq!(reset.balance().await, U256::ZERO);

    Ok(())
}

#[tokio::test]
async fn test_fixtures_survive_reverting_to_earlier_fixture() -> Result<()> {
    let mut deployments = setup_fixture().await?;
    let all = deployments.get(ContractKind::FundMe).await?;

    deployments.fixture(&["mocks"]).await?;
    // Reverting to the earlier fixture discards the later fixture's snapshot
    deployments.fixture(&["all"]).await?;
    deployments.fixture(&["mocks"]).await?;
    deployments.get(ContractKind::MockV3Aggregator).await?;

    let fund_me = FundMe::deployed(&deployments).await?;
    fund_me.fund(SEND_VALUE).await?;
    deployments.fixture(&["all"]).await?;

    let reset = FundMe::deployed(&deployments).await?;
    assert_eq!(reset.address(), all.address);
    assert_eq!(reset.balance().await, U256::ZERO);

    Ok(())
}

#[tokio::test]
async fn test_missing_network_config() -> Result<()> {
    let mut deployments = global_setup();
    let accounts = deployments.named_accounts();
    let network = NetworkConfig::builtin().network("mainnet", 1);
    let block = deployments.client().block_number().await;

    assert!(deploy_mocks(&mut deployments, &network, &accounts).await?.is_none());
    let res = deploy_fund_me(&mut deployments, &network, &accounts, None).await;

    assert!(matches!(res, Err(ScriptError::MissingNetworkConfig(1))));
    assert_eq!(deployments.client().block_number().await, block);

    Ok(())
}

#[tokio::test]
async fn test_verification_skipped_on_development_network() -> Result<()> {
    let mut deployments = global_setup();
    let network = deployments.network().await;
    let accounts = deployments.named_accounts();
    let verifier = MockVerifier::default();

    run_deploy_scripts(&mut deployments, &["all"], &network, &accounts, Some(&verifier)).await?;

    assert_eq!(verifier.num_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_verification_failure_is_not_fatal() -> Result<()> {
    let mut deployments = global_setup();
    let accounts = deployments.named_accounts();
    let network = NetworkConfig::builtin().network("sepolia", 11155111);
    let verifier = MockVerifier::failing();

    let records =
        run_deploy_scripts(&mut deployments, &["all"], &network, &accounts, Some(&verifier))
            .await?;

    // No mocks on a public network, and FundMe is wired to the configured feed
    assert_eq!(records.len(), 1);
    assert_eq!(verifier.num_calls(), 1);
    let fund_me = FundMe::deployed(&deployments).await?;
    assert_eq!(fund_me.get_price_feed().await?, SEPOLIA_ETH_USD_PRICE_FEED);

    Ok(())
}
