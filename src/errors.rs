use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Failed to parse task message: {0}")]
    ParseError(String),

    #[error("Failed to fetch object: {0}")]
    FetchError(String),

    #[error("Failed to generate summary: {0}")]
    GenerationError(String),

    #[error("Failed to derive overview key: {0}")]
    KeyDerivationError(String),

    #[error("Failed to store overview: {0}")]
    StoreError(String),

    #[error("Failed to send response message: {0}")]
    NotifyError(String),

    #[error("Failed to interact with task queue: {0}")]
    QueueError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl WorkerError {
    /// True for failures that abort a single message and leave it for redelivery.
    #[must_use]
    pub fn is_message_scoped(&self) -> bool {
        !matches!(self, WorkerError::QueueError(_) | WorkerError::ConfigError(_))
    }
}

impl From<reqwest::Error> for WorkerError {
    fn from(error: reqwest::Error) -> Self {
        WorkerError::GenerationError(error.to_string())
    }
}

impl From<serde_json::Error> for WorkerError {
    fn from(error: serde_json::Error) -> Self {
        WorkerError::ParseError(error.to_string())
    }
}
