//! LLM chat-completions client module
//!
//! Encapsulates the generation API call used to summarize documents.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use super::Summarizer;
use crate::errors::WorkerError;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Pulls `choices[0].message.content` out of a chat-completions response.
#[must_use]
pub fn extract_completion_text(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(ToString::to_string)
}

/// LLM API client for generating summaries
pub struct LlmClient {
    http: Client,
    api_url: String,
    api_key: String,
    model_name: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built with the timeout.
    pub fn new(
        api_url: String,
        api_key: String,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, WorkerError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkerError::ConfigError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_url,
            api_key,
            model_name,
        })
    }

    pub fn build_prompt(&self, prompt_text: &str) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(prompt_text.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }]
    }

    /// JSON body for the chat-completions endpoint. Only text content is sent.
    #[must_use]
    pub fn request_body(&self, prompt: &[ChatCompletionMessage]) -> Value {
        let messages: Vec<Value> = prompt
            .iter()
            .filter_map(|msg| {
                let role_str = match msg.role {
                    MessageRole::system => "system",
                    MessageRole::user => "user",
                    MessageRole::assistant => "assistant",
                    MessageRole::function => "function",
                    MessageRole::tool => "tool",
                };
                match &msg.content {
                    Content::Text(text) => Some(json!({
                        "role": role_str,
                        "content": text
                    })),
                    Content::ImageUrl(_) => None,
                }
            })
            .collect();

        json!({
            "model": self.model_name,
            "messages": messages
        })
    }

    /// # Errors
    ///
    /// Returns `GenerationError` if the request fails, the API answers with a
    /// non-success status, or the response has no `choices[0].message.content`.
    pub async fn generate_summary(
        &self,
        prompt: Vec<ChatCompletionMessage>,
    ) -> Result<String, WorkerError> {
        #[cfg(feature = "debug-logs")]
        info!("Using prompt:\n{:?}", prompt);

        let estimated_input_tokens = prompt
            .iter()
            .map(|msg| estimate_tokens(&format!("{:?}", msg.content)))
            .sum::<usize>();
        info!(
            "Requesting summary from model {} (~{} input tokens)",
            self.model_name, estimated_input_tokens
        );

        let request_body = self.request_body(&prompt);

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| WorkerError::GenerationError(format!("API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WorkerError::GenerationError(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            WorkerError::GenerationError(format!("Failed to parse API response: {e}"))
        })?;
        debug!("Generation API response: {}", response_json);

        extract_completion_text(&response_json)
            .ok_or_else(|| WorkerError::GenerationError("No text in response".to_string()))
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    async fn summarize(&self, prompt: &str) -> Result<String, WorkerError> {
        let chat = self.build_prompt(prompt);
        self.generate_summary(chat).await
    }
}
