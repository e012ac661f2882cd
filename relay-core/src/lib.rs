//! # relay-core
//!
//! Core types and traits for the relay bot: [`ConversationKey`], [`Turn`], [`Destination`],
//! the [`Messenger`] collaborator trait, the error taxonomy and tracing initialization.
//! Transport-agnostic; used by the store, prompt, session and relay-bot crates.

pub mod error;
pub mod logger;
pub mod messenger;
pub mod types;

pub use error::{BackendError, InputError, RelayError, Result};
pub use logger::init_tracing;
pub use messenger::Messenger;
pub use types::{ConversationKey, Destination, DestinationKind, Role, Turn};
