//! # relay-bot
//!
//! Telegram front end for the session controller. Loads config from env, registers the `/ask`
//! and `/help` commands, and runs the command REPL.

pub mod commands;
pub mod config;
pub mod messenger;
pub mod runner;

pub use commands::Command;
pub use config::{BaseConfig, BotConfig, SessionConfig};
pub use messenger::{destination_for, TelegramMessenger};
pub use runner::{build_bot, build_controller, run_bot};
