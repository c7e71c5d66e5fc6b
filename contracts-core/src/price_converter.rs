//! Conversion of ETH amounts into USD using a Chainlink ETH / USD price feed

use alloy_primitives::{Address, I256, U256};
use contracts_common::{
    backends::ContractHost,
    constants::{ONE_ETHER, PRICE_FEED_SCALE},
    types::RoundData,
};

use crate::errors::FundMeError;

/// Fetch the latest ETH / USD price from the feed at `feed`, scaled to 18 decimals
pub fn get_price<H: ContractHost>(host: &mut H, feed: Address) -> Result<U256, FundMeError> {
    let RoundData { answer, .. } = host
        .latest_round_data(feed)
        .map_err(FundMeError::PriceFeedCall)?;

    // A negative answer is reinterpreted bitwise, as `uint256(int256)` does
    answer
        .checked_mul(I256::from_raw(PRICE_FEED_SCALE))
        .map(I256::into_raw)
        .ok_or(FundMeError::ArithmeticOverflow)
}

/// Convert `eth_amount` wei into its USD value, with 18 decimals of precision
pub fn get_conversion_rate<H: ContractHost>(
    host: &mut H,
    eth_amount: U256,
    feed: Address,
) -> Result<U256, FundMeError> {
    let eth_price = get_price(host, feed)?;
    let usd_value = eth_price
        .checked_mul(eth_amount)
        .ok_or(FundMeError::ArithmeticOverflow)?;

    Ok(usd_value / ONE_ETHER)
}
