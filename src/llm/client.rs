//! Core `ModelClient` trait and `ApiClient` implementation.
//!
//! `ApiClient` talks to either Ollama's native `/api/chat` endpoint or any
//! OpenAI-compatible `/v1/chat/completions` endpoint (OpenAI, Groq, LM Studio,
//! vLLM …).  All connection details come from [`LlmConfig`]; nothing is
//! hardcoded.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::{LlmConfig, LlmProvider};

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur while obtaining a structured reply from the model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("LLM request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status code.
    #[error("LLM endpoint returned HTTP {0}")]
    Http(u16),

    /// The response (or the content inside it) could not be parsed as expected JSON.
    #[error("failed to parse LLM response: {0}")]
    Parse(String),

    /// The LLM returned a response with no usable text content.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// The model is switched off in configuration.
    #[error("LLM disabled in configuration")]
    Disabled,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ModelClient trait
// ---------------------------------------------------------------------------

/// Async trait for a chat-style language-model service.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn ModelClient>`).
///
/// # Arguments
/// * `system` – System instruction (assistant role and formatting rules).
/// * `user`   – The extraction prompt.
///
/// Returns the raw assistant message content.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP chat client configured from [`LlmConfig`].
///
/// The `Authorization: Bearer …` header is attached only when
/// `config.api_key` is a non-empty string, so local Ollama needs no key.
pub struct ApiClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ApiClient {
    /// Build an `ApiClient` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Endpoint URL for the configured provider, or `None` when disabled.
    pub fn endpoint(&self) -> Option<String> {
        let base = self.config.base_url.trim_end_matches('/');
        match self.config.provider {
            LlmProvider::Ollama => Some(format!("{base}/api/chat")),
            LlmProvider::OpenAiCompatible => Some(format!("{base}/v1/chat/completions")),
            LlmProvider::Disabled => None,
        }
    }

    fn request_body(&self, system: &str, user: &str) -> Value {
        let messages = serde_json::json!([
            { "role": "system", "content": system },
            { "role": "user",   "content": user   }
        ]);

        match self.config.provider {
            LlmProvider::OpenAiCompatible => serde_json::json!({
                "model":       self.config.model,
                "messages":    messages,
                "stream":      false,
                "temperature": self.config.temperature,
                "max_tokens":  self.config.max_tokens
            }),
            _ => serde_json::json!({
                "model":    self.config.model,
                "messages": messages,
                "stream":   false,
                "format":   "json",
                "options":  {
                    "temperature": self.config.temperature,
                    "num_predict": self.config.max_tokens
                }
            }),
        }
    }
}

/// Pull the assistant message out of a provider response body.
fn reply_content<'a>(provider: &LlmProvider, json: &'a Value) -> Option<&'a str> {
    match provider {
        LlmProvider::OpenAiCompatible => json["choices"][0]["message"]["content"].as_str(),
        _ => json["message"]["content"].as_str(),
    }
}

#[async_trait]
impl ModelClient for ApiClient {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        if !self.config.is_active() {
            return Err(LlmError::Disabled);
        }
        let url = self.endpoint().ok_or(LlmError::Disabled)?;

        let mut req = self.client.post(&url).json(&self.request_body(system, user));

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        log::debug!("llm: POST {} (model={})", url, self.config.model);
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = reply_content(&self.config.provider, &json)
            .ok_or(LlmError::EmptyResponse)?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
