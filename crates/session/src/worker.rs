//! Offloading the model call from the task handling the command.
//!
//! [`offload`] runs a future on its own tokio task and resumes the caller with its result. If the
//! caller stops waiting (its future is dropped), the task keeps running to completion and its
//! result is discarded.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use llm_client::ModelBackend;
use relay_core::BackendError;

/// Runs `task` on a separate tokio task. A panic or abort of that task becomes
/// [`BackendError::Worker`].
pub async fn offload<F, T>(task: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|e| BackendError::Worker(e.to_string()))?
}

/// Calls the model, failing with [`BackendError::Timeout`] when `limit` elapses first.
pub async fn call_model(
    backend: Arc<dyn ModelBackend>,
    prompt: String,
    limit: Option<Duration>,
) -> Result<String, BackendError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, backend.generate(&prompt))
            .await
            .map_err(|_| BackendError::Timeout(limit))?,
        None => backend.generate(&prompt).await,
    }
}
