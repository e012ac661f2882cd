//! Bot configuration: BaseConfig (Telegram + log) + SessionConfig (limits, timeouts) + LLM config.

mod base;
mod bot_config;
mod session;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use session::SessionConfig;
