use std::sync::Arc;

use chunker::chunk;
use conversation_store::ConversationStore;
use llm_client::ModelBackend;
use prompt::{build_prompt, ASSISTANT_CUE};
use relay_core::{ConversationKey, Destination, Messenger, Result, Turn};
use tracing::{error, info, instrument, warn};

use crate::messages::{
    backend_error_message, EMPTY_PROMPT_GUIDANCE, EMPTY_REPLY_NOTICE, HELP_TEXT,
    RESET_CONFIRMATION,
};
use crate::outcome::AskOutcome;
use crate::request::{parse_prompt, Request};
use crate::settings::SessionSettings;
use crate::worker::{call_model, offload};

/// Orchestrates `/ask` and `/help` for every chat. Cheap to clone; clones share the store,
/// backend and messenger.
#[derive(Clone)]
pub struct SessionController {
    store: Arc<ConversationStore>,
    backend: Arc<dyn ModelBackend>,
    messenger: Arc<dyn Messenger>,
    settings: SessionSettings,
}

impl SessionController {
    pub fn new(
        store: Arc<ConversationStore>,
        backend: Arc<dyn ModelBackend>,
        messenger: Arc<dyn Messenger>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            store,
            backend,
            messenger,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Sends the command overview to the requester.
    #[instrument(skip(self))]
    pub async fn help(&self, destination: &Destination) -> Result<()> {
        self.messenger.send_ephemeral(destination, HELP_TEXT).await
    }

    /// Handles one `/ask` command for the conversation `key`, replying to `destination`.
    ///
    /// Returns `Err` only when a message could not be delivered; model failures are reported to
    /// the user and returned as [`AskOutcome::Failed`].
    #[instrument(
        skip(self, key, destination, prompt),
        fields(conversation = %key, chat_id = destination.chat_id)
    )]
    pub async fn ask(
        &self,
        key: &ConversationKey,
        destination: &Destination,
        prompt: &str,
    ) -> Result<AskOutcome> {
        let question = match parse_prompt(prompt) {
            Ok(Request::Reset) => {
                let existed = self.store.reset(key);
                info!(existed, "step: conversation reset");
                self.messenger
                    .send_ephemeral(destination, RESET_CONFIRMATION)
                    .await?;
                return Ok(AskOutcome::Reset);
            }
            Err(e) => {
                info!(error = %e, "step: prompt rejected");
                self.messenger
                    .send_ephemeral(destination, EMPTY_PROMPT_GUIDANCE)
                    .await?;
                return Ok(AskOutcome::Rejected);
            }
            Ok(Request::Ask(question)) => question,
        };

        if let Err(e) = self.messenger.defer_ack(destination).await {
            warn!(error = %e, "defer ack failed, continuing");
        }

        self.store.append(key, Turn::user(question));
        let history = self.store.get_or_create(key);
        let payload = build_prompt(&history, ASSISTANT_CUE, self.settings.max_prompt_chars);
        info!(
            history_len = history.len(),
            prompt_chars = payload.chars().count(),
            "step: calling model"
        );

        let worker = offload(call_model(
            self.backend.clone(),
            payload,
            self.settings.backend_timeout,
        ));
        let result = match self.settings.interaction_timeout {
            Some(limit) => match tokio::time::timeout(limit, worker).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(?limit, "step: interaction expired before model replied, discarding");
                    return Ok(AskOutcome::Cancelled);
                }
            },
            None => worker.await,
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "step: model call failed");
                self.messenger
                    .send(destination, &backend_error_message(&e))
                    .await?;
                return Ok(AskOutcome::Failed { reason: e });
            }
        };

        let reply = reply.trim();
        if reply.is_empty() {
            warn!("step: model returned empty reply");
            self.messenger.send(destination, EMPTY_REPLY_NOTICE).await?;
            return Ok(AskOutcome::EmptyReply);
        }

        self.store.append(key, Turn::assistant(reply));

        let chunks = chunk(reply, self.settings.chunk_limit(destination.kind));
        info!(
            reply_chars = reply.chars().count(),
            chunk_count = chunks.len(),
            "step: sending reply"
        );
        for piece in &chunks {
            self.messenger.send(destination, piece).await?;
        }

        Ok(AskOutcome::Answered {
            chunks: chunks.len(),
        })
    }
}
