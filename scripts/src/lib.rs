//! Deploy scripts for the FundMe contract, and the machinery they run on:
//! network configuration, deployment records, and contract verification.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod types;
pub mod utils;
pub mod verify;
