use serde::{Deserialize, Serialize};

use crate::errors::WorkerError;

/// Unit of work: one stored object to summarize on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMessage {
    pub bucket: String,
    pub key: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl TaskMessage {
    /// Parses a task queue body. Missing fields and empty bucket/key are rejected.
    pub fn from_body(body: &str) -> Result<Self, WorkerError> {
        let task: TaskMessage = serde_json::from_str(body)?;
        if task.bucket.is_empty() {
            return Err(WorkerError::ParseError("bucket must not be empty".to_string()));
        }
        if task.key.is_empty() {
            return Err(WorkerError::ParseError("key must not be empty".to_string()));
        }
        Ok(task)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Completed,
}

/// Completion notification published on the response queue.
///
/// Delivery is at-least-once: consumers may see the same key more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub bucket: String,
    pub key: String,
    pub status: ResponseStatus,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl ResponseMessage {
    #[must_use]
    pub fn completed(task: &TaskMessage, overview_key: String) -> Self {
        Self {
            bucket: task.bucket.clone(),
            key: overview_key,
            status: ResponseStatus::Completed,
            user_id: task.user_id.clone(),
        }
    }
}

/// A message as handed out by the task queue, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: String,
}
