//! # Session
//!
//! [`SessionController`] runs one request cycle per incoming `/ask` command:
//!
//! 1. `reset` (trimmed, case-insensitive) clears the chat's history and confirms. No model call.
//! 2. An empty prompt gets a guidance reply. No model call, no history change.
//! 3. Otherwise the user turn is recorded, the prompt is built from history, and the model is
//!    called on a worker task. On success the assistant turn is recorded and the reply is sent in
//!    chunks; on failure a single error message is sent and history keeps only the user turn.
//!
//! Every failure is scoped to its request; the controller and the other conversations are not
//! affected.

mod controller;
pub mod messages;
mod outcome;
mod request;
mod settings;
pub mod worker;

pub use controller::SessionController;
pub use outcome::AskOutcome;
pub use request::{parse_prompt, Request, RESET_KEYWORD};
pub use settings::{SessionSettings, DEFAULT_INTERACTION_TIMEOUT};
