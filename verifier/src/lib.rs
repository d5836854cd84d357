//! Verification that a live deployment of the zkEVM contracts matches the
//! locally compiled artifacts and the recorded deployment manifest.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod chain;
pub mod checklist;
pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod proxy;
mod solidity;
pub mod types;
pub mod utils;
