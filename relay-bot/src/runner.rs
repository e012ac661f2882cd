//! Startup and the command REPL: builds the session controller, registers commands with
//! Telegram, and hands each command to the controller on its own task.

use std::sync::Arc;

use anyhow::{Context, Result};
use conversation_store::ConversationStore;
use llm_client::{ModelBackend, OpenAiBackend};
use relay_core::{init_tracing, Messenger};
use session::SessionController;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument, warn};

use crate::commands::Command;
use crate::config::{BaseConfig, BotConfig};
use crate::messenger::{destination_for, TelegramMessenger};

/// Creates the teloxide Bot, pointed at `telegram_api_url` when set.
pub fn build_bot(base: &BaseConfig) -> Result<Bot> {
    let bot = Bot::new(base.bot_token.clone());
    match base.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Builds the controller from config around the given messenger.
pub fn build_controller(config: &BotConfig, messenger: Arc<dyn Messenger>) -> SessionController {
    let store = Arc::new(ConversationStore::new(config.session.history_max_turns));
    let backend: Arc<dyn ModelBackend> = Arc::new(OpenAiBackend::from_config(config.llm_config()));
    SessionController::new(store, backend, messenger, config.session.to_settings())
}

/// Main entry: validate config, init logging, build the controller, register commands, then run
/// the command REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let bot = build_bot(&config.base)?;
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let controller = build_controller(&config, messenger);

    info!(
        model = %config.llm_config().model(),
        history_max_turns = config.session.history_max_turns,
        prompt_max_chars = config.session.prompt_max_chars,
        "Initializing bot"
    );

    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Commands registered"),
        Err(e) => warn!(error = %e, "Failed to register commands, continuing"),
    }

    info!("Bot started successfully");

    let store = controller.store().clone();
    Command::repl(
        bot,
        move |msg: Message, cmd: Command| {
            let controller = controller.clone();

            async move {
                let destination = destination_for(msg.chat.id, msg.chat.is_private(), msg.id);
                info!(
                    chat_id = destination.chat_id,
                    user_id = msg.from.as_ref().map(|u| u.id.0),
                    command = ?cmd,
                    "Received command"
                );

                // Run the request in a spawned task so the REPL returns immediately
                tokio::spawn(async move {
                    let result = match cmd {
                        Command::Help => controller.help(&destination).await,
                        Command::Ask(prompt) => {
                            let key = destination.conversation_key();
                            controller
                                .ask(&key, &destination, &prompt)
                                .await
                                .map(|outcome| info!(?outcome, "step: request finished"))
                        }
                    };
                    if let Err(e) = result {
                        error!(error = %e, chat_id = destination.chat_id, "Command failed");
                    }
                });

                respond(())
            }
        },
    )
    .await;

    info!(
        conversations = store.conversation_count(),
        "Bot stopped, dropping conversation histories"
    );
    store.clear();

    Ok(())
}
