//! Solidity ABI definitions for the FundMe contract and its price feed

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloc::{
    format,
    string::{String, ToString},
};
use alloy_sol_types::{sol, Panic, Revert, SolError, SolInterface};

use crate::constants::NOT_OWNER_ERROR_NAME;

// The FundMe contract interface, as exposed to funders and to its owner
sol! {
    interface IFundMe {
        /// Raised when an account other than the owner attempts a withdrawal
        error FundMe__NotOwner();

        function fund() external payable;
        function withdraw() external;
        function cheaperWithdraw() external;

        function getAddressToAmountFunded(address funder) external view returns (uint256);
        function getVersion() external view returns (uint256);
        function getFunder(uint256 index) external view returns (address);
        function getOwner() external view returns (address);
        function getPriceFeed() external view returns (address);
        function MINIMUM_USD() external view returns (uint256);
    }
}

// The Chainlink `AggregatorV3Interface`, extended with the setters of the
// `MockV3Aggregator` test contract, taken from
// https://github.com/smartcontractkit/chainlink/blob/develop/contracts/src/v0.6/tests/MockV3Aggregator.sol
sol! {
    interface IMockV3Aggregator {
        function decimals() external view returns (uint8);
        function description() external view returns (string memory);
        function version() external view returns (uint256);

        function latestAnswer() external view returns (int256);
        function latestTimestamp() external view returns (uint256);
        function latestRound() external view returns (uint256);
        function getAnswer(uint256 roundId) external view returns (int256);
        function getTimestamp(uint256 roundId) external view returns (uint256);

        function getRoundData(uint80 roundId)
            external
            view
            returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound);
        function latestRoundData()
            external
            view
            returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound);

        function updateAnswer(int256 answer) external;
        function updateRoundData(uint80 roundId, int256 answer, uint256 timestamp, uint256 startedAt) external;
    }
}

/// Decode ABI-encoded revert data into a human-readable reason.
///
/// Handles `Error(string)` reverts, the FundMe custom errors, and Solidity
/// panics. Returns `None` for empty or unrecognized revert data.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if let Ok(revert) = Revert::abi_decode(data) {
        return Some(revert.reason);
    }

    if let Ok(err) = IFundMe::IFundMeErrors::abi_decode(data) {
        return Some(match err {
            IFundMe::IFundMeErrors::FundMe__NotOwner(_) => NOT_OWNER_ERROR_NAME.to_string(),
        });
    }

    Panic::abi_decode(data)
        .ok()
        .map(|panic| format!("panic code {:#x}", panic.code))
}
