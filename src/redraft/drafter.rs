//! External draft generator - the chat-completion client behind redrafting.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Fixed framing prepended to every redraft prompt. The output has to stay
/// renderable by the PDF pipeline, hence the structural-HTML constraints.
const PROMPT_FRAMING: &str = "You are a contract redrafting assistant. \
Rewrite the contract according to the user request. Keep the HTML minimal \
and structural: only tags such as <html>, <body>, <h1>, <h2>, <p>, <ul> and \
<li>, no styling. Preserve placeholders like [Company Name] exactly as \
written. Maintain a professional legal tone.";

/// Build the user-role prompt embedding the original document and the
/// caller's instructions. Pure formatting, no transport concerns.
pub fn build_redraft_prompt(original_html: &str, instructions: &str) -> String {
    format!(
        "{}\n\nOriginal contract (HTML format):\n{}\n\nUser request: {}",
        PROMPT_FRAMING, original_html, instructions
    )
}

/// Errors from the external draft generator.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("draft service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("draft service returned status {0}: {1}")]
    Status(u16, String),
    #[error("draft service response contained no choices")]
    Empty,
}

/// Contract for producing a redrafted document from an original plus
/// instructions. Object-safe so tests can substitute their own generator.
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn redraft(&self, original_html: &str, instructions: &str)
        -> Result<String, DraftError>;
}

/// Configuration for the chat-completion endpoint, sourced from the
/// environment. The credential is never embedded in the binary.
#[derive(Debug, Clone)]
pub struct DrafterConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl DrafterConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("REDRAFT_API_KEY")
            .map_err(|_| anyhow!("REDRAFT_API_KEY environment variable not set"))?;
        let api_url =
            std::env::var("REDRAFT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = std::env::var("REDRAFT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = match std::env::var("REDRAFT_TEMPERATURE") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow!("REDRAFT_TEMPERATURE is not a number: {}", raw))?,
            Err(_) => DEFAULT_TEMPERATURE,
        };
        let max_tokens = match std::env::var("REDRAFT_MAX_TOKENS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow!("REDRAFT_MAX_TOKENS is not a number: {}", raw))?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };
        let timeout_secs = match std::env::var("REDRAFT_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow!("REDRAFT_TIMEOUT_SECS is not a number: {}", raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            api_key,
            model,
            temperature,
            max_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

fn first_choice(response: ChatResponse) -> Result<String, DraftError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(DraftError::Empty)
}

/// Draft generator backed by an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct ChatCompletionDrafter {
    client: reqwest::Client,
    config: DrafterConfig,
}

impl ChatCompletionDrafter {
    /// The client is shared with the rest of the app and already carries the
    /// request timeout from the config.
    pub fn new(client: reqwest::Client, config: DrafterConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl DraftGenerator for ChatCompletionDrafter {
    async fn redraft(
        &self,
        original_html: &str,
        instructions: &str,
    ) -> Result<String, DraftError> {
        let prompt = build_redraft_prompt(original_html, instructions);
        let body = json!({
            "model": &self.config.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(DraftError::Status(status, detail));
        }

        let parsed: ChatResponse = response.json().await?;
        first_choice(parsed)
    }
}
