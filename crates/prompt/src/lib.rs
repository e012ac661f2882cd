//! # Prompt
//!
//! Renders a [`ConversationHistory`] into the single prompt string sent to the model.
//!
//! ## Format
//!
//! One line per turn, oldest first, as `"<Role>: <text>"`, joined with `\n`, followed by `\n`
//! and a trailing cue (`"Assistant:"` by default):
//!
//! ```text
//! User: hi
//! Assistant: hello
//! User: and now?
//! Assistant:
//! ```
//!
//! ## Length bound
//!
//! If the rendered prompt is longer than `max_chars` characters, the oldest turn is dropped and
//! the prompt is rendered again, until it fits or a single turn remains. A single oversized turn
//! is returned as-is; turn text is never clipped. The caller's history is not modified.
//!
//! ## External interactions
//!
//! - **AI models**: the output is sent as the user message of a chat completion request
//!   (see [`to_chat_messages`]).

use conversation_store::ConversationHistory;
use relay_core::{Role, Turn};
use tracing::debug;

/// Cue appended after the rendered turns so the model answers as the assistant.
pub const ASSISTANT_CUE: &str = "Assistant:";

/// Default maximum prompt length in characters.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 2000;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl From<Role> for MessageRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Renders one turn as `"<Role>: <text>"`.
pub fn render_turn(turn: &Turn) -> String {
    format!("{}: {}", turn.role().label(), turn.text())
}

/// Renders all turns, oldest first, plus the trailing cue. No length bound.
pub fn render(history: &ConversationHistory, trailing_cue: &str) -> String {
    let mut out = String::new();
    for turn in history.turns() {
        out.push_str(&render_turn(turn));
        out.push('\n');
    }
    out.push_str(trailing_cue);
    out
}

/// Builds the prompt for `history`, dropping oldest turns until it fits in `max_chars`
/// characters or one turn remains.
pub fn build_prompt(history: &ConversationHistory, trailing_cue: &str, max_chars: usize) -> String {
    let mut window = history.clone();
    let mut dropped = 0usize;
    loop {
        let payload = render(&window, trailing_cue);
        if payload.chars().count() <= max_chars || window.len() <= 1 {
            if dropped > 0 {
                debug!(
                    dropped,
                    kept = window.len(),
                    prompt_chars = payload.chars().count(),
                    max_chars,
                    "prompt trimmed to length bound"
                );
            }
            return payload;
        }
        window.pop_oldest();
        dropped += 1;
    }
}

/// Wraps a prompt payload as an OpenAI-style message list: optional system instruction, then the
/// payload as one user message.
pub fn to_chat_messages(system_message: Option<&str>, payload: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_message {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(payload));
    messages
}
