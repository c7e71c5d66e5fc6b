//! Definitions of errors that can occur on the development chain

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use alloy_primitives::{Address, U256};
use contracts_common::solidity::decode_revert_reason;

/// Errors that can occur when transacting with the development chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevnetError {
    /// The call reverted, with the given ABI-encoded revert data
    Reverted(Vec<u8>),
    /// The sender cannot cover the value & gas of the transaction
    InsufficientFunds {
        /// The sender of the transaction
        sender: Address,
        /// The amount required of the sender
        required: U256,
    },
    /// The constructor arguments of a deployment could not be decoded
    InvalidConstructorArgs(String),
    /// A read-only call targeted an account without code
    NoCode(Address),
    /// A revert was requested to an unknown snapshot
    UnknownSnapshot(u64),
}

impl DevnetError {
    /// The human-readable revert reason, if this is a revert with decodable data
    pub fn revert_reason(&self) -> Option<String> {
        match self {
            DevnetError::Reverted(data) => decode_revert_reason(data),
            _ => None,
        }
    }
}

impl Display for DevnetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DevnetError::Reverted(_) => match self.revert_reason() {
                Some(reason) => write!(f, "execution reverted: {}", reason),
                None => write!(f, "execution reverted without a reason"),
            },
            DevnetError::InsufficientFunds { sender, required } => write!(
                f,
                "insufficient funds: {} requires {} wei",
                sender, required
            ),
            DevnetError::InvalidConstructorArgs(s) => {
                write!(f, "invalid constructor arguments: {}", s)
            }
            DevnetError::NoCode(address) => write!(f, "no contract code at {}", address),
            DevnetError::UnknownSnapshot(id) => write!(f, "unknown snapshot: {}", id),
        }
    }
}

impl Error for DevnetError {}
