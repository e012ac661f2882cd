//! Messaging collaborator.
//!
//! [`Messenger`] is transport-agnostic; relay-bot implements it via teloxide and tests substitute
//! recording mocks.

use crate::error::Result;
use crate::types::Destination;
use async_trait::async_trait;

/// Outgoing side of the chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a text message visible to everyone at the destination.
    async fn send(&self, destination: &Destination, text: &str) -> Result<()>;
    /// Signals that a reply is being worked on (e.g. a typing indicator).
    async fn defer_ack(&self, destination: &Destination) -> Result<()>;
    /// Sends a reply aimed at the requester only, as far as the transport allows.
    async fn send_ephemeral(&self, destination: &Destination, text: &str) -> Result<()>;
}
