//! Generation provider abstraction and implementations.
//!
//! The provider is a presence/absence capability, not a subtype hierarchy:
//! [`create_provider`] returns `None` when generation is disabled (the caller
//! always uses the local fallback answer) and `Some(handle)` when remote
//! generation should be attempted. The caller catches any failure of the
//! handle and falls back — a provider error must never surface to the user.
//!
//! # Retry Strategy
//!
//! The OpenAI provider retries transient errors with exponential backoff:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::ProviderConfig;

/// A remote text-generation backend.
#[async_trait]
pub trait GenerationProvider: Send + Sync + std::fmt::Debug {
    /// Returns the model identifier (e.g. `"gpt-4o-mini"`).
    fn model_name(&self) -> &str;

    /// Generate a completion for the prompt, or fail.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Instantiate the configured provider, or `None` when generation is
/// disabled. Unknown provider names are a configuration error.
pub fn create_provider(config: &ProviderConfig) -> Result<Option<Box<dyn GenerationProvider>>> {
    match config.provider.as_str() {
        "disabled" => Ok(None),
        "openai" => Ok(Some(Box::new(OpenAiProvider::new(config)?))),
        other => bail!("Unknown generation provider: {}", other),
    }
}

// ============ OpenAI Provider ============

/// Generation provider using the OpenAI chat completions API.
///
/// Requires the `OPENAI_API_KEY` environment variable to be set.
#[derive(Debug)]
pub struct OpenAiProvider {
    model: String,
    api_key: String,
    max_retries: u32,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            max_retries: config.max_retries,
            client,
        })
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.2,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, 8s, ...
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .client
                .post("https://api.openai.com/v1/chat/completions")
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response.json().await?;
                        return parse_completion_response(&json);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err =
                            Some(anyhow::anyhow!("OpenAI API error {}: {}", status, body_text));
                        continue;
                    }

                    // Client error (not 429) — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("OpenAI API error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Generation failed after retries")))
    }
}

/// Extract `choices[0].message.content` from a chat completions response.
fn parse_completion_response(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|content| content.to_string())
        .ok_or_else(|| anyhow::anyhow!("Malformed completion response: missing message content"))
}
