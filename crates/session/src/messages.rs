//! User-visible reply texts.

use relay_core::BackendError;

pub const HELP_TEXT: &str = "Commands:\n\
/ask <prompt> - ask the model; the conversation in this chat is kept as context.\n\
  e.g. /ask suggest something for dinner\n\n\
To clear the conversation context, use /ask reset.\n\n\
/help - show this message.";

pub const RESET_CONFIRMATION: &str = "Conversation context has been reset.";

pub const EMPTY_PROMPT_GUIDANCE: &str =
    "Please enter something to ask, or use /ask reset to clear the conversation.";

pub const EMPTY_REPLY_NOTICE: &str = "The model returned an empty reply.";

/// Error reply for a failed model call, including the underlying cause.
pub fn backend_error_message(err: &BackendError) -> String {
    format!("Error while calling the model: {}", err)
}
