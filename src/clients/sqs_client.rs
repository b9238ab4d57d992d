use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::{debug, warn};

use super::{ResponseQueue, TaskQueue};
use crate::core::models::{ReceivedMessage, ResponseMessage};
use crate::errors::WorkerError;

/// Builds an SQS client, pointing it at a custom endpoint when one is configured.
pub fn build_sqs_client(
    shared_config: &aws_config::SdkConfig,
    endpoint: Option<&str>,
) -> SqsClient {
    let mut builder = aws_sdk_sqs::config::Builder::from(shared_config);
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint_url(endpoint);
    }
    SqsClient::from_conf(builder.build())
}

pub struct SqsTaskQueue {
    client: SqsClient,
    queue_url: String,
}

impl SqsTaskQueue {
    pub fn new(client: SqsClient, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

#[async_trait]
impl TaskQueue for SqsTaskQueue {
    async fn receive(
        &self,
        max_messages: i32,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, WorkerError> {
        let wait_seconds = i32::try_from(wait.as_secs()).unwrap_or(i32::MAX);
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_seconds)
            .send()
            .await
            .map_err(|e| {
                WorkerError::QueueError(format!(
                    "Failed to receive messages: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let mut received = Vec::new();
        for message in output.messages.unwrap_or_default() {
            // Without a receipt handle the message could never be acknowledged.
            let Some(receipt_handle) = message.receipt_handle else {
                warn!(
                    "Skipping SQS message {:?} without receipt handle",
                    message.message_id
                );
                continue;
            };
            received.push(ReceivedMessage {
                message_id: message.message_id.unwrap_or_default(),
                receipt_handle,
                body: message.body.unwrap_or_default(),
            });
        }
        debug!("Received {} messages from {}", received.len(), self.queue_url);
        Ok(received)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), WorkerError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| {
                WorkerError::QueueError(format!(
                    "Failed to delete message: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

pub struct SqsResponseQueue {
    client: SqsClient,
    queue_url: String,
}

impl SqsResponseQueue {
    pub fn new(client: SqsClient, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

#[async_trait]
impl ResponseQueue for SqsResponseQueue {
    async fn send(&self, response: &ResponseMessage) -> Result<(), WorkerError> {
        let message_body = serde_json::to_string(response)
            .map_err(|e| WorkerError::NotifyError(format!("Failed to serialize response: {e}")))?;

        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(message_body)
            .send()
            .await
            .map_err(|e| {
                WorkerError::NotifyError(format!(
                    "Failed to send message to SQS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
