//! In-memory collaborators for driving the worker without AWS or HTTP.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use overview_worker::WorkerError;
use overview_worker::clients::{ObjectStore, ResponseQueue, Summarizer, TaskQueue};
use overview_worker::core::models::{ReceivedMessage, ResponseMessage};
use overview_worker::worker::{FileProcessor, PollBackoff, PollSettings, Sleeper, Worker};

#[derive(Default)]
pub struct MemoryObjectStore {
    pub objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    pub fail_puts: bool,
}

impl MemoryObjectStore {
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, WorkerError> {
        self.object(bucket, key)
            .ok_or_else(|| WorkerError::FetchError(format!("s3://{bucket}/{key}: NoSuchKey")))
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), WorkerError> {
        if self.fail_puts {
            return Err(WorkerError::StoreError(format!("s3://{bucket}/{key}: denied")));
        }
        self.insert(bucket, key, body);
        Ok(())
    }
}

/// Returns a canned summary (or failure) and records every prompt.
pub struct StubSummarizer {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubSummarizer {
    pub fn replying(summary: &str) -> Self {
        Self {
            reply: Some(summary.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, WorkerError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| WorkerError::GenerationError("No text in response".to_string()))
    }
}

/// Hands out scripted batches; `None` in the script simulates a receive failure.
/// Once the script runs out every receive returns an empty batch.
#[derive(Default)]
pub struct ScriptedTaskQueue {
    pub script: Mutex<VecDeque<Option<Vec<ReceivedMessage>>>>,
    pub receive_calls: Mutex<Vec<(i32, Duration)>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_deletes: bool,
}

impl ScriptedTaskQueue {
    pub fn with_batches(batches: Vec<Option<Vec<ReceivedMessage>>>) -> Self {
        Self {
            script: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn receive_calls(&self) -> Vec<(i32, Duration)> {
        self.receive_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskQueue for ScriptedTaskQueue {
    async fn receive(
        &self,
        max_messages: i32,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, WorkerError> {
        self.receive_calls.lock().unwrap().push((max_messages, wait));
        match self.script.lock().unwrap().pop_front() {
            Some(Some(batch)) => Ok(batch),
            Some(None) => Err(WorkerError::QueueError("connection refused".to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), WorkerError> {
        if self.fail_deletes {
            return Err(WorkerError::QueueError("receipt handle expired".to_string()));
        }
        self.deleted.lock().unwrap().push(receipt_handle.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingResponseQueue {
    pub sent: Mutex<Vec<ResponseMessage>>,
    pub fail_sends: bool,
}

impl RecordingResponseQueue {
    pub fn sent(&self) -> Vec<ResponseMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseQueue for RecordingResponseQueue {
    async fn send(&self, response: &ResponseMessage) -> Result<(), WorkerError> {
        if self.fail_sends {
            return Err(WorkerError::NotifyError("queue does not exist".to_string()));
        }
        self.sent.lock().unwrap().push(response.clone());
        Ok(())
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

pub fn message(id: &str, body: &str) -> ReceivedMessage {
    ReceivedMessage {
        message_id: id.to_string(),
        receipt_handle: format!("receipt-{id}"),
        body: body.to_string(),
    }
}

pub fn task_body(bucket: &str, key: &str, user_id: &str) -> String {
    serde_json::json!({ "bucket": bucket, "key": key, "userId": user_id }).to_string()
}

pub fn default_settings() -> PollSettings {
    PollSettings {
        batch_size: 5,
        wait_time: Duration::from_secs(10),
        backoff_time: Duration::from_secs(5),
    }
}

/// Everything a worker test needs to make assertions afterwards.
pub struct Harness {
    pub worker: Worker,
    pub tasks: Arc<ScriptedTaskQueue>,
    pub responses: Arc<RecordingResponseQueue>,
    pub store: Arc<MemoryObjectStore>,
    pub summarizer: Arc<StubSummarizer>,
    pub sleeper: Arc<RecordingSleeper>,
}

impl Harness {
    pub fn new(
        tasks: ScriptedTaskQueue,
        responses: RecordingResponseQueue,
        store: MemoryObjectStore,
        summarizer: StubSummarizer,
    ) -> Self {
        let tasks = Arc::new(tasks);
        let responses = Arc::new(responses);
        let store = Arc::new(store);
        let summarizer = Arc::new(summarizer);
        let sleeper = Arc::new(RecordingSleeper::default());

        let worker = Worker::new(
            tasks.clone(),
            responses.clone(),
            FileProcessor::new(store.clone(), summarizer.clone()),
            sleeper.clone(),
            default_settings(),
        )
        .with_poll_backoff(PollBackoff::without_jitter());

        Self {
            worker,
            tasks,
            responses,
            store,
            summarizer,
            sleeper,
        }
    }
}
