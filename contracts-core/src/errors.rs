//! Errors stemming from FundMe contract operations

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use alloy_primitives::U256;
use alloy_sol_types::{Panic, Revert, SolError};
use contracts_common::{
    backends::CallError,
    constants::{
        INSUFFICIENT_ETH_MESSAGE, NOT_OWNER_ERROR_NAME, PANIC_ARITHMETIC_OVERFLOW,
        PANIC_ARRAY_OUT_OF_BOUNDS,
    },
    solidity::IFundMe,
};

/// Errors that can occur while executing a call against the FundMe contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundMeError {
    /// A withdrawal was attempted by an account other than the owner
    NotOwner,
    /// A `fund` call carried less than the minimum USD value
    InsufficientEth,
    /// A funder was requested at an index past the end of the funders list
    FunderIndexOutOfBounds,
    /// An arithmetic operation over- or underflowed
    ArithmeticOverflow,
    /// Sending the contract balance to the owner failed
    TransferFailed,
    /// The call to the price feed failed
    PriceFeedCall(CallError),
    /// Value was sent to a non-payable method
    NonPayable,
    /// The calldata matched a method selector but could not be decoded
    InvalidCalldata,
}

impl FundMeError {
    /// The ABI-encoded revert data for this error, as the Solidity contract would emit it
    pub fn revert_data(&self) -> Vec<u8> {
        match self {
            FundMeError::NotOwner => IFundMe::FundMe__NotOwner {}.abi_encode(),
            FundMeError::InsufficientEth => Revert {
                reason: INSUFFICIENT_ETH_MESSAGE.into(),
            }
            .abi_encode(),
            FundMeError::FunderIndexOutOfBounds => Panic {
                code: U256::from(PANIC_ARRAY_OUT_OF_BOUNDS),
            }
            .abi_encode(),
            FundMeError::ArithmeticOverflow => Panic {
                code: U256::from(PANIC_ARITHMETIC_OVERFLOW),
            }
            .abi_encode(),
            FundMeError::TransferFailed
            | FundMeError::PriceFeedCall(_)
            | FundMeError::NonPayable
            | FundMeError::InvalidCalldata => Vec::new(),
        }
    }
}

impl Display for FundMeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FundMeError::NotOwner => write!(f, "{}", NOT_OWNER_ERROR_NAME),
            FundMeError::InsufficientEth => write!(f, "{}", INSUFFICIENT_ETH_MESSAGE),
            FundMeError::FunderIndexOutOfBounds => write!(f, "funder index out of bounds"),
            FundMeError::ArithmeticOverflow => write!(f, "arithmetic overflow"),
            FundMeError::TransferFailed => write!(f, "transfer to owner failed"),
            FundMeError::PriceFeedCall(e) => write!(f, "price feed call failed: {:?}", e),
            FundMeError::NonPayable => write!(f, "value sent to non-payable method"),
            FundMeError::InvalidCalldata => write!(f, "invalid calldata"),
        }
    }
}
