use std::time::Duration;

use chunker::{DEFAULT_GROUP_MAX_CHARS, DEFAULT_MAX_CHARS};
use prompt::DEFAULT_MAX_PROMPT_CHARS;
use relay_core::DestinationKind;

/// Lifetime of a deferred interaction: after this the reply can no longer be delivered.
pub const DEFAULT_INTERACTION_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Per-request limits used by [`crate::SessionController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Maximum prompt length in characters.
    pub max_prompt_chars: usize,
    /// Maximum outgoing message length for direct chats.
    pub chunk_max_direct: usize,
    /// Maximum outgoing message length for groups and channels.
    pub chunk_max_group: usize,
    /// Optional limit on the model call itself.
    pub backend_timeout: Option<Duration>,
    /// Limit on the whole request; when it expires the request ends as cancelled.
    pub interaction_timeout: Option<Duration>,
}

impl SessionSettings {
    pub fn chunk_limit(&self, kind: DestinationKind) -> usize {
        match kind {
            DestinationKind::Direct => self.chunk_max_direct,
            DestinationKind::Group => self.chunk_max_group,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            chunk_max_direct: DEFAULT_MAX_CHARS,
            chunk_max_group: DEFAULT_GROUP_MAX_CHARS,
            backend_timeout: None,
            interaction_timeout: Some(DEFAULT_INTERACTION_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SessionSettings::default();
        assert_eq!(s.max_prompt_chars, 2000);
        assert_eq!(s.chunk_limit(DestinationKind::Direct), 2000);
        assert_eq!(s.chunk_limit(DestinationKind::Group), 1024);
        assert!(s.backend_timeout.is_none());
        assert_eq!(s.interaction_timeout, Some(Duration::from_secs(900)));
    }
}
