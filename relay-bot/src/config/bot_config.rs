//! BotConfig: BaseConfig + SessionConfig + LLM config. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{BaseConfig, SessionConfig};

/// Bot config. Use BotConfig::load() for env-based loading.
pub struct BotConfig {
    pub base: BaseConfig,
    pub session: SessionConfig,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let session = SessionConfig::from_env()?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self { base, session, llm })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.session.validate()?;
        if reqwest::Url::parse(self.llm.base_url()).is_err() {
            anyhow::bail!("LLM_BASE_URL is not a valid URL: {}", self.llm.base_url());
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn llm_config(&self) -> &dyn LlmConfig {
        &self.llm
    }
}
