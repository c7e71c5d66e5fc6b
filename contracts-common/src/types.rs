//! Common types shared by the contracts and the chains that host them

use core::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy_primitives::{I256, U256};

/// A single round of price feed data, mirroring the return values of
/// Chainlink's `latestRoundData` / `getRoundData`.
///
/// Round ids are `uint80` on the wire, and are widened to `U256` here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundData {
    /// The id of the round
    pub round_id: U256,
    /// The answer reported in the round
    pub answer: I256,
    /// The timestamp at which the round started
    pub started_at: U256,
    /// The timestamp at which the round was last updated
    pub updated_at: U256,
    /// The round in which the answer was computed
    pub answered_in_round: U256,
}

/// The contracts that can be deployed to a chain in this project
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractKind {
    /// The FundMe contract
    FundMe,
    /// The Chainlink `MockV3Aggregator` price feed, used on development chains
    MockV3Aggregator,
}

impl ContractKind {
    /// The contract name, as used for artifacts and deployment records
    pub fn name(&self) -> &'static str {
        match self {
            ContractKind::FundMe => "FundMe",
            ContractKind::MockV3Aggregator => "MockV3Aggregator",
        }
    }
}

impl Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown contract name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContract;

impl FromStr for ContractKind {
    type Err = UnknownContract;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FundMe" => Ok(ContractKind::FundMe),
            "MockV3Aggregator" => Ok(ContractKind::MockV3Aggregator),
            _ => Err(UnknownContract),
        }
    }
}
