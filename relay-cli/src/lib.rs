//! # relay-cli
//!
//! Argument parsing and config loading for the `relay` binary.

pub mod cli;

pub use cli::{load_config, Cli, Commands};
pub use relay_bot::BotConfig;
