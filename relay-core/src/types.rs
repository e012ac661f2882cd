//! Core types: conversation key, turn, destination.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope under which history is kept (one per chat). Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey(String);

impl ConversationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ConversationKey {
    fn from(chat_id: i64) -> Self {
        Self(chat_id.to_string())
    }
}

impl From<&str> for ConversationKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering a turn into a prompt line (`"<Role>: <text>"`).
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message in a conversation. Fields are private so a turn cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Kind of chat a reply goes to; selects the outgoing chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestinationKind {
    /// One-to-one chat with the bot.
    Direct,
    /// Group, supergroup or broadcast channel.
    Group,
}

/// Where outgoing messages for one request are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub chat_id: i64,
    pub kind: DestinationKind,
    /// Transport message id of the command being answered, used for requester-only replies.
    pub reply_to: Option<i32>,
}

impl Destination {
    pub fn new(chat_id: i64, kind: DestinationKind) -> Self {
        Self {
            chat_id,
            kind,
            reply_to: None,
        }
    }

    pub fn replying_to(mut self, message_id: i32) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    /// Conversation scope for this destination: one history per chat.
    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::from(self.chat_id)
    }
}
