//! Constants used in the deploy scripts

use alloy_primitives::{address, Address};

// ------------
// | NETWORKS |
// ------------

/// The name of the in-process development network
pub const HARDHAT_NETWORK: &str = "hardhat";

/// The name of a development node running locally, reached over RPC
pub const LOCALHOST_NETWORK: &str = "localhost";

/// Networks on which a mock price feed is deployed & verification is skipped
pub const DEVELOPMENT_CHAINS: [&str; 2] = [HARDHAT_NETWORK, LOCALHOST_NETWORK];

/// The default RPC url of a locally running node
pub const DEFAULT_LOCALHOST_RPC_URL: &str = "http://127.0.0.1:8545";

/// The number of confirmations waited for when none are configured
pub const DEFAULT_BLOCK_CONFIRMATIONS: u64 = 1;

/// The number of confirmations waited for on public networks
pub const PUBLIC_NETWORK_BLOCK_CONFIRMATIONS: u64 = 6;

/// The chain id of the Rinkeby testnet
pub const RINKEBY_CHAIN_ID: u64 = 4;
/// The ETH / USD price feed on Rinkeby
pub const RINKEBY_ETH_USD_PRICE_FEED: Address =
    address!("8A753747A1Fa494EC906cE90E9f37563A8AF630e");

/// The chain id of the Goerli testnet
pub const GOERLI_CHAIN_ID: u64 = 5;
/// The ETH / USD price feed on Goerli
pub const GOERLI_ETH_USD_PRICE_FEED: Address =
    address!("D4a33860578De61DBAbDc8BFdb98FD742fA7028e");

/// The chain id of Polygon mainnet
pub const POLYGON_CHAIN_ID: u64 = 137;
/// The ETH / USD price feed on Polygon
pub const POLYGON_ETH_USD_PRICE_FEED: Address =
    address!("F9680D99D6C9589e2a93a78a04A279e509205945");

/// The chain id of the Sepolia testnet
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
/// The ETH / USD price feed on Sepolia
pub const SEPOLIA_ETH_USD_PRICE_FEED: Address =
    address!("694AA1769357215DE4FAC081bf1f309aDFcf5306");

// ---------------
// | DEPLOY TAGS |
// ---------------

/// Tag selecting every deploy script
pub const ALL_TAG: &str = "all";

/// Tag selecting the mock deploy script
pub const MOCKS_TAG: &str = "mocks";

/// Tag selecting the FundMe deploy script
pub const FUND_ME_TAG: &str = "fundme";

/// Logged once the mocks are deployed
pub const MOCKS_DEPLOYED_MSG: &str = "Mocks deployed!";

/// Logged at the end of each deploy script
pub const LOG_SEPARATOR: &str = "----------------------------------------------------";

// -------------
// | ARTIFACTS |
// -------------

/// The default directory holding Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The default directory deployment records are written to
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// The source file of the FundMe contract
pub const FUND_ME_SOURCE_NAME: &str = "contracts/FundMe.sol";

/// The source file of the mock price feed
pub const MOCK_V3_AGGREGATOR_SOURCE_NAME: &str = "contracts/test/MockV3Aggregator.sol";

/// The extension of artifact & deployment record files
pub const JSON_EXTENSION: &str = "json";

/// The extension of the Hardhat debug file pointing at an artifact's build info
pub const DEBUG_FILE_EXTENSION: &str = "dbg.json";

/// The file recording the chain id of a network's deployments
pub const CHAIN_ID_FILE: &str = ".chainId";

// ----------------
// | VERIFICATION |
// ----------------

/// The Etherscan (multichain) API endpoint
pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

/// The code format submitted for verification
pub const STANDARD_JSON_CODE_FORMAT: &str = "solidity-standard-json-input";

/// The number of seconds between verification status polls
pub const VERIFICATION_POLL_INTERVAL_SECS: u64 = 5;

/// The number of verification status polls before giving up
pub const MAX_VERIFICATION_POLLS: usize = 24;

/// The timeout, in seconds, of a single request to the block explorer
pub const EXPLORER_REQUEST_TIMEOUT_SECS: u64 = 30;
