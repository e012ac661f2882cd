use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Failure of one model backend call. Always scoped to the request that made it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{0}")]
    Request(String),

    #[error("model returned no choices")]
    EmptyChoices,

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("worker failed: {0}")]
    Worker(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Empty prompt")]
    EmptyPrompt,
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display_carries_cause() {
        let err = BackendError::Request("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");

        let wrapped: RelayError = err.into();
        assert_eq!(wrapped.to_string(), "Backend error: quota exceeded");
    }

    #[test]
    fn test_timeout_display() {
        let err = BackendError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "model call timed out after 30s");
    }
}
