//! An in-process development chain, standing in for a local node in tests
//! and in deployments to the `hardhat` network.
//!
//! The chain hosts only the contracts implemented in `contracts-core`; calldata
//! is dispatched to them directly rather than interpreted as EVM bytecode.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod client;
pub mod constants;
pub mod errors;
mod host;
pub mod node;
mod state;
pub mod types;

pub use client::{DevnetClient, SharedDevnet};
pub use node::Devnet;
