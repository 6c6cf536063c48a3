pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod faucet;
pub mod flags;
pub mod identity;
pub mod project;
pub mod revert;
pub mod toolchain;
pub mod units;
