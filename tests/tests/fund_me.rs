use alloy_primitives::U256;
use contracts_common::{
    constants::{MINIMUM_USD, MOCK_AGGREGATOR_VERSION},
    types::ContractKind,
};
use devnet::constants::DEFAULT_ACCOUNTS;
use eyre::Result;
use scripts::deployments::Deployments;
use tests::{
    fund_me::{FundMe, SEND_VALUE},
    utils::{assert_reverted_with, setup_fixture},
};

/// The revert reason of an out-of-bounds `getFunder` index
const OUT_OF_BOUNDS_REASON: &str = "panic code 0x32";

/// Fund the contract from the deployer, then from accounts 1 through 5
async fn fund_from_many(fund_me: &FundMe) -> Result<()> {
    fund_me.fund(SEND_VALUE).await?;
    for funder in &DEFAULT_ACCOUNTS[1..6] {
        fund_me.connect(*funder).fund(SEND_VALUE).await?;
    }

    Ok(())
}

// ---------------
// | CONSTRUCTOR |
// ---------------

#[tokio::test]
async fn test_constructor_sets_price_feed() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let mock = deployments.get(ContractKind::MockV3Aggregator).await?;

    assert_eq!(fund_me.get_price_feed().await?, mock.address);
    assert_eq!(fund_me.get_owner().await?, deployments.named_accounts().deployer);
    assert_eq!(fund_me.get_version().await?, U256::from(MOCK_AGGREGATOR_VERSION));
    assert_eq!(fund_me.minimum_usd().await?, MINIMUM_USD);

    Ok(())
}

// --------
// | FUND |
// --------

#[tokio::test]
async fn test_fund_without_enough_eth() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;

    assert_reverted_with(fund_me.fund(U256::ZERO).await, "You need to spend more ETH!")?;

    // 0.02 ETH is worth $40 at the mock price of $2000
    let too_little = SEND_VALUE / U256::from(50u64);
    assert_reverted_with(fund_me.fund(too_little).await, "You need to spend more ETH!")
}

#[tokio::test]
async fn test_fund_updates_amount_funded() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let deployer = deployments.named_accounts().deployer;

    fund_me.fund(SEND_VALUE).await?;
    assert_eq!(fund_me.get_address_to_amount_funded(deployer).await?, SEND_VALUE);

    // Repeated funding accumulates
    fund_me.fund(SEND_VALUE).await?;
    assert_eq!(
        fund_me.get_address_to_amount_funded(deployer).await?,
        SEND_VALUE * U256::from(2u64)
    );

    Ok(())
}

#[tokio::test]
async fn test_fund_adds_funder() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;

    fund_me.fund(SEND_VALUE).await?;

    assert_eq!(fund_me.get_funder(0).await?, deployments.named_accounts().deployer);
    assert_reverted_with(fund_me.get_funder(1).await, OUT_OF_BOUNDS_REASON)
}

// ------------
// | WITHDRAW |
// ------------

#[tokio::test]
async fn test_withdraw_single_funder() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let deployer = deployments.named_accounts().deployer;
    fund_me.fund(SEND_VALUE).await?;

    let starting_fund_me_balance = fund_me.balance().await;
    let starting_deployer_balance = fund_me.balance_of(deployer).await;

    let receipt = fund_me.withdraw().await?;

    let ending_fund_me_balance = fund_me.balance().await;
    let ending_deployer_balance = fund_me.balance_of(deployer).await;

    assert_eq!(ending_fund_me_balance, U256::ZERO);
    assert_eq!(
        starting_fund_me_balance + starting_deployer_balance,
        ending_deployer_balance + receipt.gas_cost()
    );

    Ok(())
}

#[tokio::test]
async fn test_withdraw_multiple_funders() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let deployer = deployments.named_accounts().deployer;
    fund_from_many(&fund_me).await?;

    let starting_fund_me_balance = fund_me.balance().await;
    let starting_deployer_balance = fund_me.balance_of(deployer).await;
    assert_eq!(starting_fund_me_balance, SEND_VALUE * U256::from(6u64));

    let receipt = fund_me.withdraw().await?;

    let ending_fund_me_balance = fund_me.balance().await;
    let ending_deployer_balance = fund_me.balance_of(deployer).await;

    assert_eq!(ending_fund_me_balance, U256::ZERO);
    assert_eq!(
        starting_fund_me_balance + starting_deployer_balance,
        ending_deployer_balance + receipt.gas_cost()
    );

    // The funders are reset
    assert_reverted_with(fund_me.get_funder(0).await, OUT_OF_BOUNDS_REASON)?;
    for funder in &DEFAULT_ACCOUNTS[..6] {
        assert_eq!(fund_me.get_address_to_amount_funded(*funder).await?, U256::ZERO);
    }

    Ok(())
}

#[tokio::test]
async fn test_cheaper_withdraw_multiple_funders() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let deployer = deployments.named_accounts().deployer;
    fund_from_many(&fund_me).await?;

    let starting_fund_me_balance = fund_me.balance().await;
    let starting_deployer_balance = fund_me.balance_of(deployer).await;

    let receipt = fund_me.cheaper_withdraw().await?;

    let ending_fund_me_balance = fund_me.balance().await;
    let ending_deployer_balance = fund_me.balance_of(deployer).await;

    assert_eq!(ending_fund_me_balance, U256::ZERO);
    assert_eq!(
        starting_fund_me_balance + starting_deployer_balance,
        ending_deployer_balance + receipt.gas_cost()
    );

    assert_reverted_with(fund_me.get_funder(0).await, OUT_OF_BOUNDS_REASON)?;
    for funder in &DEFAULT_ACCOUNTS[..6] {
        assert_eq!(fund_me.get_address_to_amount_funded(*funder).await?, U256::ZERO);
    }

    Ok(())
}

#[tokio::test]
async fn test_cheaper_withdraw_uses_less_gas() -> Result<()> {
    let mut deployments = setup_fixture().await?;
    let deployer = deployments.named_accounts().deployer;

    let fund_me = FundMe::deployed(&deployments).await?;
    fund_from_many(&fund_me).await?;
    let start = fund_me.balance_of(deployer).await;
    let withdraw_receipt = fund_me.withdraw().await?;
    let withdraw_gain = fund_me.balance_of(deployer).await + withdraw_receipt.gas_cost() - start;

    // Replay the same scenario from the fixture, withdrawing the cheaper way
    deployments.fixture(&["all"]).await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    fund_from_many(&fund_me).await?;
    let start = fund_me.balance_of(deployer).await;
    let cheaper_receipt = fund_me.cheaper_withdraw().await?;
    let cheaper_gain = fund_me.balance_of(deployer).await + cheaper_receipt.gas_cost() - start;

    assert_eq!(withdraw_gain, cheaper_gain);
    assert!(
        cheaper_receipt.gas_used < withdraw_receipt.gas_used,
        "cheaperWithdraw used {} gas, withdraw used {}",
        cheaper_receipt.gas_used,
        withdraw_receipt.gas_used
    );

    Ok(())
}

#[tokio::test]
async fn test_only_owner_can_withdraw() -> Result<()> {
    let deployments = setup_fixture().await?;
    let fund_me = FundMe::deployed(&deployments).await?;
    let accounts = deployments.named_accounts();
    fund_me.fund(SEND_VALUE).await?;

    let fund_me_balance = fund_me.balance().await;
    let attacker_balance = fund_me.balance_of(accounts.user).await;

    let attacker_connected = fund_me.connect(accounts.user);
    assert_reverted_with(attacker_connected.withdraw().await, "FundMe__NotOwner")?;
    assert_reverted_with(attacker_connected.cheaper_withdraw().await, "FundMe__NotOwner")?;

    // A reverted withdrawal moves no funds
    assert_eq!(fund_me.balance().await, fund_me_balance);
    assert_eq!(fund_me.balance_of(accounts.user).await, attacker_balance);

    fund_me.withdraw().await?;
    assert_eq!(fund_me.balance().await, U256::ZERO);

    Ok(())
}
