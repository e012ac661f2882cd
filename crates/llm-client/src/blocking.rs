//! Adapter for synchronous model SDKs.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::BackendError;

use super::ModelBackend;

/// A model whose client only offers a blocking call.
pub trait BlockingModel: Send + Sync + 'static {
    fn generate_blocking(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Runs a [`BlockingModel`] on tokio's blocking thread pool so the caller's runtime threads stay
/// free for other conversations. A panic inside the model becomes [`BackendError::Worker`].
pub struct BlockingBackend<M> {
    inner: Arc<M>,
}

impl<M: BlockingModel> BlockingBackend<M> {
    pub fn new(model: M) -> Self {
        Self {
            inner: Arc::new(model),
        }
    }
}

#[async_trait]
impl<M: BlockingModel> ModelBackend for BlockingBackend<M> {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let inner = self.inner.clone();
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || inner.generate_blocking(&prompt))
            .await
            .map_err(|e| BackendError::Worker(e.to_string()))?
    }
}
