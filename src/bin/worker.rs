// Process entry point for the overview worker

use overview_worker::core::config::WorkerConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    overview_worker::setup_logging();

    let config = WorkerConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;
    info!(
        "Worker starting: task queue {}, response queue {}, model {}",
        config.task_queue_url, config.response_queue_url, config.model
    );

    let worker = overview_worker::worker::build_worker(&config).await?;
    worker.run().await;

    Ok(())
}
