//! Client modules for external service interactions
//!
//! The worker only talks to its collaborators through the traits below, so the
//! loop can run against AWS and an HTTP generation API in production and
//! against in-memory fakes in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::models::{ReceivedMessage, ResponseMessage};
use crate::errors::WorkerError;

pub mod llm_client;
pub mod s3_client;
pub mod sqs_client;

pub use llm_client::LlmClient;
pub use s3_client::S3ObjectStore;
pub use sqs_client::{SqsResponseQueue, SqsTaskQueue};

/// Blob store addressed by (bucket, key).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, WorkerError>;

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), WorkerError>;
}

/// Text generation service turning a prompt into a summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String, WorkerError>;
}

/// Source of work items with explicit acknowledgement.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Receives up to `max_messages`, waiting at most `wait` for any to arrive.
    async fn receive(
        &self,
        max_messages: i32,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, WorkerError>;

    async fn delete(&self, receipt_handle: &str) -> Result<(), WorkerError>;
}

/// Destination for completion notifications.
#[async_trait]
pub trait ResponseQueue: Send + Sync {
    async fn send(&self, response: &ResponseMessage) -> Result<(), WorkerError>;
}
