use std::env;
use std::time::Duration;

use crate::errors::WorkerError;

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "x-ai/grok-4-fast:free";
pub const DEFAULT_BATCH_SIZE: i32 = 5;
pub const DEFAULT_WAIT_SECONDS: u64 = 10;
pub const DEFAULT_BACKOFF_SECONDS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

// SQS receive limits
const MAX_BATCH_SIZE: i32 = 10;
const MAX_WAIT_SECONDS: u64 = 20;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub task_queue_url: String,
    pub response_queue_url: String,
    pub queue_endpoint: Option<String>,
    pub store_endpoint: Option<String>,
    pub region: String,
    pub api_endpoint: String,
    pub api_key: String,
    pub model: String,
    pub batch_size: i32,
    pub wait_time: Duration,
    pub backoff_time: Duration,
    pub request_timeout: Duration,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, WorkerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WorkerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| WorkerError::ConfigError(format!("{name} is not set")))
        };
        let localstack = optional("LOCALSTACK_ENDPOINT");

        let batch_size: i32 = parse_or(&lookup, "TASK_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
        let wait_seconds: u64 = parse_or(&lookup, "TASK_WAIT_SECONDS", DEFAULT_WAIT_SECONDS)?;

        Ok(Self {
            task_queue_url: required("TASK_QUEUE_URL")?,
            response_queue_url: required("RESPONSE_QUEUE_URL")?,
            queue_endpoint: optional("SQS_ENDPOINT").or_else(|| localstack.clone()),
            store_endpoint: optional("S3_ENDPOINT").or(localstack),
            region: optional("AWS_DEFAULT_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            api_endpoint: optional("SUMMARY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: required("SUMMARY_API_KEY")?,
            model: optional("SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
            wait_time: Duration::from_secs(wait_seconds.min(MAX_WAIT_SECONDS)),
            backoff_time: Duration::from_secs(parse_or(
                &lookup,
                "EMPTY_BATCH_BACKOFF_SECONDS",
                DEFAULT_BACKOFF_SECONDS,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SUMMARY_TIMEOUT_SECONDS",
                DEFAULT_TIMEOUT_SECONDS,
            )?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, WorkerError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| WorkerError::ConfigError(format!("{name}: {e}"))),
        None => Ok(default),
    }
}
