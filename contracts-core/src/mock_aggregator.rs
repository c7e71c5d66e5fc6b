//! A mock Chainlink price feed, mirroring
//! https://github.com/smartcontractkit/chainlink/blob/develop/contracts/src/v0.6/tests/MockV3Aggregator.sol
//!
//! Only ever deployed to development chains.

use alloc::{collections::BTreeMap, string::ToString, vec::Vec};

use alloy_primitives::{I256, U256};
use alloy_sol_types::{SolInterface, SolValue};
use contracts_common::{
    backends::ContractHost,
    constants::{
        MOCK_AGGREGATOR_DESCRIPTION, MOCK_AGGREGATOR_VERSION, SLOAD_GAS, SSTORE_RESET_GAS,
        SSTORE_SET_GAS,
    },
    solidity::IMockV3Aggregator::IMockV3AggregatorCalls,
    types::RoundData,
};

use crate::{CallResult, Contract};

/// The state of a deployed mock aggregator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockV3Aggregator {
    /// The number of decimals in each answer
    decimals: u8,
    /// The most recent answer
    latest_answer: I256,
    /// The timestamp of the most recent answer
    latest_timestamp: U256,
    /// The id of the most recent round
    latest_round: U256,
    /// Answers, by round id
    answers: BTreeMap<U256, I256>,
    /// Update timestamps, by round id
    timestamps: BTreeMap<U256, U256>,
    /// Start timestamps, by round id
    started_at: BTreeMap<U256, U256>,
}

impl MockV3Aggregator {
    /// Construct the aggregator, recording `initial_answer` as round 1
    pub fn new<H: ContractHost>(host: &mut H, decimals: u8, initial_answer: I256) -> Self {
        host.charge_gas(SSTORE_SET_GAS);
        let mut aggregator = Self {
            decimals,
            latest_answer: I256::ZERO,
            latest_timestamp: U256::ZERO,
            latest_round: U256::ZERO,
            answers: BTreeMap::new(),
            timestamps: BTreeMap::new(),
            started_at: BTreeMap::new(),
        };
        aggregator.update_answer(host, initial_answer);
        aggregator
    }

    /// Record a new answer in a fresh round, timestamped with the current block
    pub fn update_answer<H: ContractHost>(&mut self, host: &mut H, answer: I256) {
        let now = host.block_timestamp();
        let round_id = self.latest_round + U256::from(1u64);
        self.store_round(host, round_id, answer, now, now);
    }

    /// Overwrite the data of an arbitrary round, making it the latest
    pub fn update_round_data<H: ContractHost>(
        &mut self,
        host: &mut H,
        round_id: U256,
        answer: I256,
        timestamp: U256,
        started_at: U256,
    ) {
        self.store_round(host, round_id, answer, timestamp, started_at);
    }

    /// The data recorded for `round_id`; unknown rounds read as zeroed
    pub fn get_round_data(&self, round_id: U256) -> RoundData {
        RoundData {
            round_id,
            answer: self.answers.get(&round_id).copied().unwrap_or_default(),
            started_at: self.started_at.get(&round_id).copied().unwrap_or_default(),
            updated_at: self.timestamps.get(&round_id).copied().unwrap_or_default(),
            answered_in_round: round_id,
        }
    }

    /// The data recorded for the latest round
    pub fn latest_round_data(&self) -> RoundData {
        self.get_round_data(self.latest_round)
    }

    /// The number of decimals in each answer
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// The most recent answer
    pub fn latest_answer(&self) -> I256 {
        self.latest_answer
    }

    /// The id of the most recent round
    pub fn latest_round(&self) -> U256 {
        self.latest_round
    }

    /// The version of the aggregator
    pub fn version(&self) -> U256 {
        U256::from(MOCK_AGGREGATOR_VERSION)
    }

    /// Write a round's data to storage and mark it as the latest
    fn store_round<H: ContractHost>(
        &mut self,
        host: &mut H,
        round_id: U256,
        answer: I256,
        timestamp: U256,
        started_at: U256,
    ) {
        let new_round = !self.answers.contains_key(&round_id);
        let round_gas = if new_round {
            SSTORE_SET_GAS
        } else {
            SSTORE_RESET_GAS
        };
        host.charge_gas(SLOAD_GAS + 3 * SSTORE_RESET_GAS + 3 * round_gas);

        self.latest_round = round_id;
        self.latest_answer = answer;
        self.latest_timestamp = timestamp;
        self.answers.insert(round_id, answer);
        self.timestamps.insert(round_id, timestamp);
        self.started_at.insert(round_id, started_at);
    }
}

/// Encode round data as the `(uint80, int256, uint256, uint256, uint80)` return tuple
fn encode_round_data(data: RoundData) -> Vec<u8> {
    (
        data.round_id,
        data.answer,
        data.started_at,
        data.updated_at,
        data.answered_in_round,
    )
        .abi_encode_params()
}

impl Contract for MockV3Aggregator {
    fn execute<H: ContractHost>(&mut self, host: &mut H, input: &[u8]) -> CallResult {
        // The mock has neither `receive` nor `fallback`, so reverts on unknown calldata
        let call = IMockV3AggregatorCalls::abi_decode(input).map_err(|_| Vec::new())?;
        if !host.msg_value().is_zero() {
            return Err(Vec::new());
        }

        host.charge_gas(SLOAD_GAS);
        let ret = match call {
            IMockV3AggregatorCalls::decimals(_) => U256::from(self.decimals()).abi_encode(),
            IMockV3AggregatorCalls::description(_) => {
                MOCK_AGGREGATOR_DESCRIPTION.to_string().abi_encode()
            }
            IMockV3AggregatorCalls::version(_) => self.version().abi_encode(),
            IMockV3AggregatorCalls::latestAnswer(_) => self.latest_answer.abi_encode(),
            IMockV3AggregatorCalls::latestTimestamp(_) => self.latest_timestamp.abi_encode(),
            IMockV3AggregatorCalls::latestRound(_) => self.latest_round.abi_encode(),
            IMockV3AggregatorCalls::getAnswer(call) => {
                self.get_round_data(call.roundId).answer.abi_encode()
            }
            IMockV3AggregatorCalls::getTimestamp(call) => {
                self.get_round_data(call.roundId).updated_at.abi_encode()
            }
            IMockV3AggregatorCalls::getRoundData(call) => {
                let round_id = U256::from(call.roundId.to::<u128>());
                encode_round_data(self.get_round_data(round_id))
            }
            IMockV3AggregatorCalls::latestRoundData(_) => {
                encode_round_data(self.latest_round_data())
            }
            IMockV3AggregatorCalls::updateAnswer(call) => {
                self.update_answer(host, call.answer);
                Vec::new()
            }
            IMockV3AggregatorCalls::updateRoundData(call) => {
                let round_id = U256::from(call.roundId.to::<u128>());
                self.update_round_data(host, round_id, call.answer, call.timestamp, call.startedAt);
                Vec::new()
            }
        };

        Ok(ret)
    }
}
