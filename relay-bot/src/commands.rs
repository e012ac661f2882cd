//! Slash commands understood by the bot.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show how to use the bot.")]
    Help,
    #[command(description = "ask the model; \"/ask reset\" clears this chat's context.")]
    Ask(String),
}
