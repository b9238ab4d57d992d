use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::backoff::{PollBackoff, Sleeper};
use super::processor::FileProcessor;
use crate::clients::{ResponseQueue, TaskQueue};
use crate::core::config::WorkerConfig;
use crate::core::models::{ReceivedMessage, ResponseMessage, TaskMessage};
use crate::errors::WorkerError;

/// Pacing of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub batch_size: i32,
    pub wait_time: Duration,
    pub backoff_time: Duration,
}

impl From<&WorkerConfig> for PollSettings {
    fn from(config: &WorkerConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            wait_time: config.wait_time,
            backoff_time: config.backoff_time,
        }
    }
}

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Processed { succeeded: usize, failed: usize },
    Empty,
    Failed,
}

/// Consume-process-acknowledge loop over the task queue.
pub struct Worker {
    tasks: Arc<dyn TaskQueue>,
    responses: Arc<dyn ResponseQueue>,
    processor: FileProcessor,
    sleeper: Arc<dyn Sleeper>,
    settings: PollSettings,
    poll_backoff: PollBackoff,
}

impl Worker {
    pub fn new(
        tasks: Arc<dyn TaskQueue>,
        responses: Arc<dyn ResponseQueue>,
        processor: FileProcessor,
        sleeper: Arc<dyn Sleeper>,
        settings: PollSettings,
    ) -> Self {
        Self {
            tasks,
            responses,
            processor,
            sleeper,
            settings,
            poll_backoff: PollBackoff::new(),
        }
    }

    #[must_use]
    pub fn with_poll_backoff(mut self, poll_backoff: PollBackoff) -> Self {
        self.poll_backoff = poll_backoff;
        self
    }

    /// Polls forever. Only process termination stops the worker.
    pub async fn run(mut self) {
        info!(
            "Worker started (batch_size={}, wait={:?}, backoff={:?})",
            self.settings.batch_size, self.settings.wait_time, self.settings.backoff_time
        );
        loop {
            self.poll_once().await;
        }
    }

    /// Receives one batch and drains it in order, pausing when there is
    /// nothing to do or the queue is unreachable.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let messages = match self
            .tasks
            .receive(self.settings.batch_size, self.settings.wait_time)
            .await
        {
            Ok(messages) => {
                self.poll_backoff.reset();
                messages
            }
            Err(e) => {
                let delay = self.poll_backoff.next_delay();
                error!("Polling task queue failed, retrying in {:?}: {}", delay, e);
                self.sleeper.sleep(delay).await;
                return PollOutcome::Failed;
            }
        };

        if messages.is_empty() {
            info!("No new messages, waiting {:?}", self.settings.backoff_time);
            self.sleeper.sleep(self.settings.backoff_time).await;
            return PollOutcome::Empty;
        }

        let mut succeeded = 0;
        let mut failed = 0;
        for message in &messages {
            let span = info_span!(
                "task",
                correlation_id = %Uuid::new_v4(),
                message_id = %message.message_id
            );
            match self.handle_message(message).instrument(span).await {
                Ok(_) => succeeded += 1,
                Err(e) => {
                    failed += 1;
                    if e.is_message_scoped() {
                        warn!(
                            "Message {} left for redelivery: {}",
                            message.message_id, e
                        );
                    } else {
                        error!(
                            "Message {} could not be acknowledged: {}",
                            message.message_id, e
                        );
                    }
                }
            }
        }
        PollOutcome::Processed { succeeded, failed }
    }

    /// Runs one message through parse, process, notify and acknowledge.
    ///
    /// The message is deleted only after the response was sent; on any error
    /// it stays on the queue and is redelivered after its visibility timeout.
    pub async fn handle_message(&self, message: &ReceivedMessage) -> Result<String, WorkerError> {
        let task = TaskMessage::from_body(&message.body)?;
        info!(
            "Processing file {} from {} for user {}",
            task.key, task.bucket, task.user_id
        );

        let overview_key = self.processor.process(&task.bucket, &task.key).await?;

        let response = ResponseMessage::completed(&task, overview_key.clone());
        self.responses.send(&response).await?;
        info!("Sent response message for {}", overview_key);

        self.tasks.delete(&message.receipt_handle).await?;
        info!("Deleted message {}", message.message_id);

        Ok(overview_key)
    }
}
