#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Failed to reach summarization backend: {0}")]
    Transport(String),

    #[error("Summarization backend answered with status {0}")]
    Status(u16),

    #[error("Malformed response from summarization backend: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SummarizeError {
    /// Network failures and non-2xx answers, as opposed to a 2xx answer whose
    /// body could not be used.
    pub fn is_transport_or_status(&self) -> bool {
        matches!(self, SummarizeError::Transport(_) | SummarizeError::Status(_))
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SummarizeError::Status(status.as_u16()),
            None => SummarizeError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SummarizeError {
    fn from(err: serde_json::Error) -> Self {
        SummarizeError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SummarizeError>;
