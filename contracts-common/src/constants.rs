//! Constants that parameterize the FundMe contract, its price feed mock,
//! and the gas schedule they are metered against

use alloy_primitives::{uint, U256};

// ------------
// | FUND ME  |
// ------------

/// The minimum USD value, with 18 decimals of precision, that a single
/// `fund` call must carry
pub const MINIMUM_USD: U256 = uint!(50_000_000_000_000_000_000_U256);

/// The factor by which a Chainlink ETH / USD answer (8 decimals) is scaled
/// to reach 18 decimals of precision
pub const PRICE_FEED_SCALE: U256 = uint!(10_000_000_000_U256);

/// One ether, denominated in wei
pub const ONE_ETHER: U256 = uint!(1_000_000_000_000_000_000_U256);

/// The revert message for a `fund` call below the minimum USD value
pub const INSUFFICIENT_ETH_MESSAGE: &str = "You need to spend more ETH!";

/// The name of the custom error raised on a non-owner withdrawal
pub const NOT_OWNER_ERROR_NAME: &str = "FundMe__NotOwner";

/// The Solidity panic code for arithmetic over/underflow
pub const PANIC_ARITHMETIC_OVERFLOW: u64 = 0x11;

/// The Solidity panic code for an out-of-bounds array access
pub const PANIC_ARRAY_OUT_OF_BOUNDS: u64 = 0x32;

// ---------------------
// | MOCK AGGREGATOR   |
// ---------------------

/// The number of decimals reported by the mock ETH / USD price feed
pub const MOCK_DECIMALS: u8 = 8;

/// The initial answer of the mock ETH / USD price feed, i.e. $2000
pub const MOCK_INITIAL_ANSWER: i128 = 200_000_000_000;

/// The version reported by the mock aggregator
pub const MOCK_AGGREGATOR_VERSION: u64 = 0;

/// The description reported by the mock aggregator
pub const MOCK_AGGREGATOR_DESCRIPTION: &str = "v0.6/tests/MockV3Aggregator.sol";

// ----------------
// | GAS SCHEDULE |
// ----------------

/// The intrinsic gas cost of any transaction
pub const TX_BASE_GAS: u64 = 21_000;

/// The additional intrinsic gas cost of a contract creation transaction
pub const TX_CREATE_GAS: u64 = 32_000;

/// The gas cost of a zero byte of calldata
pub const CALLDATA_ZERO_BYTE_GAS: u64 = 4;

/// The gas cost of a non-zero byte of calldata
pub const CALLDATA_NONZERO_BYTE_GAS: u64 = 16;

/// The gas cost of a (cold) storage read
pub const SLOAD_GAS: u64 = 2_100;

/// The gas cost of writing a non-zero value to a zeroed storage slot
pub const SSTORE_SET_GAS: u64 = 20_000;

/// The gas cost of overwriting an already-set storage slot
pub const SSTORE_RESET_GAS: u64 = 2_900;

/// The gas cost of a call which transfers value
pub const CALL_VALUE_GAS: u64 = 9_000;

/// The gas cost of a (cold) static call into another contract
pub const STATIC_CALL_GAS: u64 = 2_600;

/// The gas cost of copying a single word to memory
pub const MEMORY_WORD_GAS: u64 = 3;
