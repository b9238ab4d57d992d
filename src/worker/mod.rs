//! Task queue worker and file processing

pub mod backoff;
pub mod handler;
pub mod processor;

use std::sync::Arc;

use aws_sdk_sqs::config::Region;

use crate::clients::sqs_client::build_sqs_client;
use crate::clients::{LlmClient, S3ObjectStore, SqsResponseQueue, SqsTaskQueue};
use crate::core::config::WorkerConfig;
use crate::errors::WorkerError;

pub use backoff::{PollBackoff, Sleeper, TokioSleeper};
pub use handler::{PollOutcome, PollSettings, Worker};
pub use processor::FileProcessor;

/// Wires the production collaborators (SQS, S3, generation API) into a worker.
///
/// # Errors
///
/// Returns `ConfigError` if the generation client cannot be constructed.
pub async fn build_worker(config: &WorkerConfig) -> Result<Worker, WorkerError> {
    let shared_config = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let sqs = build_sqs_client(&shared_config, config.queue_endpoint.as_deref());
    let tasks = Arc::new(SqsTaskQueue::new(sqs.clone(), config.task_queue_url.clone()));
    let responses = Arc::new(SqsResponseQueue::new(sqs, config.response_queue_url.clone()));

    let store = Arc::new(S3ObjectStore::from_shared_config(
        &shared_config,
        config.store_endpoint.as_deref(),
    ));
    let summarizer = Arc::new(LlmClient::new(
        config.api_endpoint.clone(),
        config.api_key.clone(),
        config.model.clone(),
        config.request_timeout,
    )?);

    Ok(Worker::new(
        tasks,
        responses,
        FileProcessor::new(store, summarizer),
        Arc::new(TokioSleeper),
        PollSettings::from(config),
    ))
}
