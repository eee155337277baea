//! OpenAI Responses API driver.
//!
//! Sends a single text request and extracts the text result. The primary
//! extraction path is the `output_text` convenience field; when it is
//! absent the structured `output[0].content[0].text` path is used. The
//! driver never retries — a failed call is fatal for the current
//! invocation and the caller decides what that means.

use async_trait::async_trait;
use bino_types::error::{BinoError, BinoResult};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API base URL.
const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Output token cap for a single draft.
const MAX_OUTPUT_TOKENS: u32 = 200;

/// Text generation collaborator.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Request a single draft for `prompt`.
    async fn generate(&self, prompt: &str) -> BinoResult<String>;

    /// Model identifier recorded with each post.
    fn model(&self) -> &str;
}

/// Client for the OpenAI Responses API.
pub struct OpenAiDriver {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiDriver {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> BinoResult<Self> {
        Self::with_base_url(OPENAI_BASE_URL, api_key, model)
    }

    /// Create a driver against a non-default base URL (proxies, tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> BinoResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BinoError::LlmDriver(format!("failed to build HTTP client: {e}")))?;
        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl Generator for OpenAiDriver {
    async fn generate(&self, prompt: &str) -> BinoResult<String> {
        let body = json!({
            "model": self.model,
            "input": [{ "role": "user", "content": prompt }],
            "max_output_tokens": MAX_OUTPUT_TOKENS,
        });

        debug!(model = %self.model, "Requesting draft");
        let resp = self
            .client
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| BinoError::LlmDriver(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BinoError::LlmDriver(format!("API returned {status}: {body}")));
        }

        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| BinoError::LlmDriver(format!("failed to parse response: {e}")))?;
        extract_text(&value)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull the generated text out of a Responses API payload.
pub fn extract_text(value: &serde_json::Value) -> BinoResult<String> {
    if let Some(text) = value.get("output_text").and_then(|v| v.as_str()) {
        return Ok(text.to_string());
    }
    value
        .pointer("/output/0/content/0/text")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| BinoError::LlmDriver("no text in generation response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_primary_field() {
        let value = serde_json::json!({ "output_text": "gm BNB fam" });
        assert_eq!(extract_text(&value).unwrap(), "gm BNB fam");
    }

    #[test]
    fn test_extract_structured_fallback() {
        let value = serde_json::json!({
            "output": [{ "content": [{ "type": "output_text", "text": "gm BNB fam" }] }]
        });
        assert_eq!(extract_text(&value).unwrap(), "gm BNB fam");
    }

    #[test]
    fn test_extract_prefers_primary_field() {
        let value = serde_json::json!({
            "output_text": "primary",
            "output": [{ "content": [{ "text": "fallback" }] }]
        });
        assert_eq!(extract_text(&value).unwrap(), "primary");
    }

    #[test]
    fn test_extract_missing_text_is_driver_error() {
        let value = serde_json::json!({ "output": [] });
        let err = extract_text(&value).unwrap_err();
        assert!(matches!(err, BinoError::LlmDriver(_)));
    }
}
