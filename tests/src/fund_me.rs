//! A typed handle to a deployed FundMe contract, in the manner of an
//! ethers contract instance

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolValue};
use contracts_common::{solidity::IFundMe, types::ContractKind};
use devnet::{errors::DevnetError, types::TransactionReceipt, DevnetClient};
use eyre::Result;
use scripts::deployments::{Deployments, HardhatDeployments};

/// The value sent in each funding call in the tests: 1 ETH
pub const SEND_VALUE: U256 = contracts_common::constants::ONE_ETHER;

/// A FundMe contract connected to a signer
#[derive(Clone, Debug)]
pub struct FundMe {
    /// The client, signing as the connected account
    client: DevnetClient,
    /// The address of the contract
    address: Address,
}

impl FundMe {
    /// The deployed FundMe, connected to the deployer
    pub async fn deployed(deployments: &HardhatDeployments) -> Result<Self> {
        let address = deployments.get(ContractKind::FundMe).await?.address;
        let client = deployments.client().connect(deployments.named_accounts().deployer);
        Ok(Self { client, address })
    }

    /// The same contract, connected to `signer`
    pub fn connect(&self, signer: Address) -> Self {
        Self { client: self.client.connect(signer), address: self.address }
    }

    /// The address of the contract
    pub fn address(&self) -> Address {
        self.address
    }

    /// The balance of `account`
    pub async fn balance_of(&self, account: Address) -> U256 {
        self.client.get_balance(account).await
    }

    /// The balance held by the contract
    pub async fn balance(&self) -> U256 {
        self.balance_of(self.address).await
    }

    // ------------------
    // | STATE-CHANGING |
    // ------------------

    /// Call `fund` with `value` wei attached
    pub async fn fund(&self, value: U256) -> Result<TransactionReceipt, DevnetError> {
        self.client.send(self.address, IFundMe::fundCall {}.abi_encode(), value).await
    }

    /// Call `withdraw`
    pub async fn withdraw(&self) -> Result<TransactionReceipt, DevnetError> {
        self.client.send(self.address, IFundMe::withdrawCall {}.abi_encode(), U256::ZERO).await
    }

    /// Call `cheaperWithdraw`
    pub async fn cheaper_withdraw(&self) -> Result<TransactionReceipt, DevnetError> {
        self.client
            .send(self.address, IFundMe::cheaperWithdrawCall {}.abi_encode(), U256::ZERO)
            .await
    }

    // -----------
    // | GETTERS |
    // -----------

    /// Call `getFunder`
    pub async fn get_funder(&self, index: u64) -> Result<Address> {
        let calldata = IFundMe::getFunderCall { index: U256::from(index) }.abi_encode();
        let ret = self.client.call(self.address, calldata).await?;
        Ok(Address::abi_decode(&ret)?)
    }

    /// Call `getAddressToAmountFunded`
    pub async fn get_address_to_amount_funded(&self, funder: Address) -> Result<U256> {
        let ret = self
            .client
            .call(self.address, IFundMe::getAddressToAmountFundedCall { funder }.abi_encode())
            .await?;
        Ok(U256::abi_decode(&ret)?)
    }

    /// Call `getPriceFeed`
    pub async fn get_price_feed(&self) -> Result<Address> {
        let ret = self
            .client
            .call(self.address, IFundMe::getPriceFeedCall {}.abi_encode())
            .await?;
        Ok(Address::abi_decode(&ret)?)
    }

    /// Call `getOwner`
    pub async fn get_owner(&self) -> Result<Address> {
        let ret = self.client.call(self.address, IFundMe::getOwnerCall {}.abi_encode()).await?;
        Ok(Address::abi_decode(&ret)?)
    }

    /// Call `getVersion`
    pub async fn get_version(&self) -> Result<U256> {
        let ret = self.client.call(self.address, IFundMe::getVersionCall {}.abi_encode()).await?;
        Ok(U256::abi_decode(&ret)?)
    }

    /// Call `MINIMUM_USD`
    pub async fn minimum_usd(&self) -> Result<U256> {
        let ret = self
            .client
            .call(self.address, IFundMe::MINIMUM_USDCall {}.abi_encode())
            .await?;
        Ok(U256::abi_decode(&ret)?)
    }
}
