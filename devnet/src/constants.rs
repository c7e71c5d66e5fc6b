//! Constants parameterizing the development chain

use alloy_primitives::{address, uint, Address, U256};

/// The chain id of the development chain, matching Hardhat & Anvil
pub const DEVNET_CHAIN_ID: u64 = 31337;

/// The gas price, in wei, charged for every transaction (1 gwei)
pub const DEFAULT_GAS_PRICE: u128 = 1_000_000_000;

/// The balance each default account starts with (10 000 ETH)
pub const DEFAULT_ACCOUNT_BALANCE: U256 = uint!(10_000_000_000_000_000_000_000_U256);

/// The timestamp of the genesis block
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// The number of seconds between consecutive blocks
pub const BLOCK_TIME_SECS: u64 = 1;

/// The default accounts of the development chain, derived from the
/// well-known "test test ... junk" mnemonic used by Hardhat & Anvil
pub const DEFAULT_ACCOUNTS: [Address; 10] = [
    address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
    address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
    address!("90F79bf6EB2c4f870365E785982E1f101E93b906"),
    address!("15d34AAf54267DB7D7c367839AAf71A00a2C6A65"),
    address!("9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
    address!("976EA74026E726554dB657fA54763abd0C3a0aa9"),
    address!("14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
    address!("23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f"),
    address!("a0Ee7A142d267C1f36714E4a8F75612F20a79720"),
];
