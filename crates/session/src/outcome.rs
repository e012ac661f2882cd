use relay_core::BackendError;

/// How one `/ask` request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// History cleared and confirmed.
    Reset,
    /// Empty prompt; guidance sent.
    Rejected,
    /// Reply recorded and sent as `chunks` messages.
    Answered { chunks: usize },
    /// Model replied with nothing but whitespace; a notice was sent, no assistant turn recorded.
    EmptyReply,
    /// Model call failed; the error was reported to the user.
    Failed { reason: BackendError },
    /// The interaction expired before the model answered; the late result is discarded.
    Cancelled,
}
