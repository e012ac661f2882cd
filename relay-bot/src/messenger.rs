//! [`Messenger`] over teloxide. Production code sends through the Telegram Bot API; session tests
//! substitute a recording implementation.

use async_trait::async_trait;
use relay_core::{Destination, DestinationKind, Messenger, RelayError, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, MessageId, ReplyParameters};

/// Thin wrapper around teloxide::Bot that implements [`Messenger`].
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: teloxide::Bot,
}

impl TelegramMessenger {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, destination: &Destination, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(destination.chat_id), text.to_string())
            .await
            .map_err(|e| RelayError::Messaging(e.to_string()))?;
        Ok(())
    }

    async fn defer_ack(&self, destination: &Destination) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(destination.chat_id), ChatAction::Typing)
            .await
            .map_err(|e| RelayError::Messaging(e.to_string()))?;
        Ok(())
    }

    /// Telegram has no per-user messages inside a group, so this replies to the command message.
    async fn send_ephemeral(&self, destination: &Destination, text: &str) -> Result<()> {
        let request = self
            .bot
            .send_message(ChatId(destination.chat_id), text.to_string());
        let request = match destination.reply_to {
            Some(id) => request.reply_parameters(ReplyParameters::new(MessageId(id))),
            None => request,
        };
        request
            .await
            .map_err(|e| RelayError::Messaging(e.to_string()))?;
        Ok(())
    }
}

/// Destination for a reply to the command message `message_id` in chat `chat_id`. Private chats
/// are direct; groups, supergroups and channels share the group limits.
pub fn destination_for(chat_id: ChatId, is_private: bool, message_id: MessageId) -> Destination {
    let kind = if is_private {
        DestinationKind::Direct
    } else {
        DestinationKind::Group
    };
    Destination::new(chat_id.0, kind).replying_to(message_id.0)
}
