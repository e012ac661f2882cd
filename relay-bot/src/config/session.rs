//! Session limits and timeouts. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use conversation_store::DEFAULT_MAX_TURNS;
use session::{SessionSettings, DEFAULT_INTERACTION_TIMEOUT};

/// Limits applied to every conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// HISTORY_MAX_TURNS
    pub history_max_turns: usize,
    /// PROMPT_MAX_CHARS
    pub prompt_max_chars: usize,
    /// CHUNK_MAX_DIRECT
    pub chunk_max_direct: usize,
    /// CHUNK_MAX_GROUP
    pub chunk_max_group: usize,
    /// BACKEND_TIMEOUT_SECS; `None` means the model call is not bounded on its own.
    pub backend_timeout_secs: Option<u64>,
    /// INTERACTION_TIMEOUT_SECS
    pub interaction_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let settings = SessionSettings::default();
        Self {
            history_max_turns: DEFAULT_MAX_TURNS,
            prompt_max_chars: settings.max_prompt_chars,
            chunk_max_direct: settings.chunk_max_direct,
            chunk_max_group: settings.chunk_max_group,
            backend_timeout_secs: None,
            interaction_timeout_secs: DEFAULT_INTERACTION_TIMEOUT.as_secs(),
        }
    }
}

impl SessionConfig {
    /// Load from environment variables; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            history_max_turns: parse_var("HISTORY_MAX_TURNS")?
                .unwrap_or(defaults.history_max_turns),
            prompt_max_chars: parse_var("PROMPT_MAX_CHARS")?.unwrap_or(defaults.prompt_max_chars),
            chunk_max_direct: parse_var("CHUNK_MAX_DIRECT")?.unwrap_or(defaults.chunk_max_direct),
            chunk_max_group: parse_var("CHUNK_MAX_GROUP")?.unwrap_or(defaults.chunk_max_group),
            backend_timeout_secs: parse_var("BACKEND_TIMEOUT_SECS")?,
            interaction_timeout_secs: parse_var("INTERACTION_TIMEOUT_SECS")?
                .unwrap_or(defaults.interaction_timeout_secs),
        })
    }

    /// All limits must be at least 1.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("HISTORY_MAX_TURNS", self.history_max_turns as u64),
            ("PROMPT_MAX_CHARS", self.prompt_max_chars as u64),
            ("CHUNK_MAX_DIRECT", self.chunk_max_direct as u64),
            ("CHUNK_MAX_GROUP", self.chunk_max_group as u64),
            ("INTERACTION_TIMEOUT_SECS", self.interaction_timeout_secs),
        ];
        for (name, value) in limits {
            if value == 0 {
                anyhow::bail!("{} must be at least 1", name);
            }
        }
        if self.backend_timeout_secs == Some(0) {
            anyhow::bail!("BACKEND_TIMEOUT_SECS must be at least 1 when set");
        }
        Ok(())
    }

    pub fn to_settings(&self) -> SessionSettings {
        SessionSettings {
            max_prompt_chars: self.prompt_max_chars,
            chunk_max_direct: self.chunk_max_direct,
            chunk_max_group: self.chunk_max_group,
            backend_timeout: self.backend_timeout_secs.map(Duration::from_secs),
            interaction_timeout: Some(Duration::from_secs(self.interaction_timeout_secs)),
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        _ => Ok(None),
    }
}
