//! Test doubles for the session controller: a recording [`Messenger`] and scripted
//! [`ModelBackend`]s. No network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use llm_client::ModelBackend;
use relay_core::{BackendError, Destination, Messenger, RelayError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message(i64, String),
    Ack(i64),
    Ephemeral(i64, String),
}

/// Records every outgoing call in order.
#[derive(Default)]
pub struct MockMessenger {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_ack: bool,
}

impl MockMessenger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_ack() -> Arc<Self> {
        Arc::new(Self {
            fail_ack: true,
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of public messages sent to `chat_id`.
    pub fn messages_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(id, text) if id == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send(&self, destination: &Destination, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Message(destination.chat_id, text.to_string()));
        Ok(())
    }

    async fn defer_ack(&self, destination: &Destination) -> Result<()> {
        if self.fail_ack {
            return Err(RelayError::Messaging("ack rejected".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Ack(destination.chat_id));
        Ok(())
    }

    async fn send_ephemeral(&self, destination: &Destination, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Ephemeral(destination.chat_id, text.to_string()));
        Ok(())
    }
}

/// What the scripted backend does on every call.
#[derive(Clone)]
pub enum Script {
    Reply(String),
    Fail(BackendError),
    /// Sleeps, then replies.
    Slow(Duration, String),
}

/// Backend that follows a [`Script`] and records the prompts it receives.
pub struct ScriptedBackend {
    script: Script,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(err) => Err(err.clone()),
            Script::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }
}
