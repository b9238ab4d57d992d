//! Overview worker - summarizes uploaded documents pulled from a task queue.
//!
//! The worker long-polls an SQS task queue for `{bucket, key, userId}` tasks,
//! reads each object from S3, asks a chat-completions API for a two-sentence
//! summary, stores it next to the source as `<name>_overview.txt`, and reports
//! completion on a response queue before acknowledging the task.
//!
//! # Architecture
//!
//! The system uses:
//! - SQS for task intake and completion notifications
//! - S3 for source documents and generated overviews
//! - reqwest + openai-api-rs message types for the generation API
//! - Tokio for async runtime
//!
//! Delivery is at-least-once: a task is deleted only after its response was
//! sent, so a crash in between can produce a duplicate response message.
//!
//! # Example
//!
//! ```no_run
//! use overview_worker::core::config::WorkerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     overview_worker::setup_logging();
//!
//!     let config = WorkerConfig::from_env()?;
//!     let mut worker = overview_worker::worker::build_worker(&config).await?;
//!
//!     // Drain a single batch instead of running forever
//!     let outcome = worker.poll_once().await;
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod worker;

pub use errors::WorkerError;

/// Configure structured logging with JSON format.
///
/// Level filtering follows `RUST_LOG` and defaults to `info`. Call once at
/// process start.
///
/// # Example
///
/// ```
/// overview_worker::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
