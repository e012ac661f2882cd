use relay_core::InputError;

/// Reserved prompt value that clears the conversation instead of asking the model.
pub const RESET_KEYWORD: &str = "reset";

/// What an `/ask` prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Reset,
    /// Trimmed prompt text.
    Ask(String),
}

/// Classifies a raw prompt. Reset wins over the empty check, matching on trimmed lower-case text.
pub fn parse_prompt(raw: &str) -> Result<Request, InputError> {
    let trimmed = raw.trim();
    if trimmed.to_lowercase() == RESET_KEYWORD {
        return Ok(Request::Reset);
    }
    if trimmed.is_empty() {
        return Err(InputError::EmptyPrompt);
    }
    Ok(Request::Ask(trimmed.to_string()))
}
