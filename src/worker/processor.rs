use std::sync::Arc;

use tracing::info;

use crate::clients::{ObjectStore, Summarizer};
use crate::core::keys::derive_overview_key;
use crate::errors::WorkerError;
use crate::prompt::build_summary_prompt;

/// Turns one stored document into a stored overview next to it.
pub struct FileProcessor {
    store: Arc<dyn ObjectStore>,
    summarizer: Arc<dyn Summarizer>,
}

impl FileProcessor {
    pub fn new(store: Arc<dyn ObjectStore>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { store, summarizer }
    }

    /// Fetches `bucket/key`, summarizes it and stores the result under the
    /// derived overview key, which is returned.
    ///
    /// No retries happen here; any failure leaves nothing written.
    pub async fn process(&self, bucket: &str, key: &str) -> Result<String, WorkerError> {
        if bucket.is_empty() || key.is_empty() {
            return Err(WorkerError::FetchError(
                "bucket and key are required".to_string(),
            ));
        }
        // Checked up front so a key we cannot name an output for costs no API call.
        let overview_key = derive_overview_key(key)?;

        let raw = self.store.get_object(bucket, key).await?;
        let document = String::from_utf8(raw).map_err(|e| {
            WorkerError::FetchError(format!("s3://{bucket}/{key} is not valid UTF-8: {e}"))
        })?;
        info!("Fetched s3://{}/{} ({} bytes)", bucket, key, document.len());

        let prompt = build_summary_prompt(&document);
        let summary = self.summarizer.summarize(&prompt).await?;

        self.store
            .put_object(bucket, &overview_key, summary.into_bytes())
            .await?;
        info!("Summary uploaded to s3://{}/{}", bucket, overview_key);

        Ok(overview_key)
    }
}
