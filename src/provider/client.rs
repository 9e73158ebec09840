//! Core `CompletionProvider` trait and `ApiProvider` implementation.
//!
//! `ApiProvider` calls any OpenAI-compatible `/v1/chat/completions` endpoint
//! — a hosted gateway, OpenAI, Groq, or a local server in OpenAI mode.
//! All connection details come from [`ProviderConfig`]; nothing is
//! hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ProviderConfig;
use crate::provider::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors that can occur while requesting learning content.
///
/// Rate limiting (429) and quota exhaustion (402) are distinguished from
/// other failures because they call for different user-facing messages: one
/// invites a retry, the other needs external remediation. Nothing here is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("provider request timed out")]
    Timeout,

    /// The provider signalled 429 — the user may try again shortly.
    #[error("rate limit exceeded — please try again in a moment")]
    RateLimited,

    /// The provider signalled 402 — fatal for the current session.
    #[error("payment required — please add credits to your workspace")]
    QuotaExceeded,

    /// Any other non-success status.
    #[error("provider returned status {status}")]
    Provider { status: u16 },

    /// The HTTP response body could not be read as the expected chat
    /// completion envelope.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The envelope parsed but carried no usable message content.
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Map a non-success HTTP status onto the error taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => ProviderError::RateLimited,
            402 => ProviderError::QuotaExceeded,
            status => ProviderError::Provider { status },
        }
    }

    /// `true` when the user may reasonably submit the same topic again.
    ///
    /// Quota exhaustion is excluded: it requires remediation outside the
    /// app, so prompting a retry would only frustrate.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::QuotaExceeded)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// CompletionProvider trait
// ---------------------------------------------------------------------------

/// Async trait for generating raw learning-content text from a topic.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn CompletionProvider>`). The returned string is
/// the provider's message content as-is — extraction and validation are the
/// caller's job.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, topic: &str) -> Result<String, ProviderError>;
}

// ---------------------------------------------------------------------------
// ApiProvider
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// Works with any backend that speaks the OpenAI chat-completions wire
/// format. All connection details (`base_url`, `api_key`, `model`) come
/// exclusively from the [`ProviderConfig`] passed to
/// [`ApiProvider::from_config`].
pub struct ApiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    prompt_builder: PromptBuilder,
}

impl ApiProvider {
    /// Build an `ApiProvider` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for ApiProvider {
    /// Request an explanation, example, and quiz for `topic`.
    ///
    /// The `Authorization: Bearer …` header is attached **only** when
    /// `config.api_key` is `Some(key)` and `key` is non-empty — safe for
    /// local providers that require no authentication.
    async fn complete(&self, topic: &str) -> Result<String, ProviderError> {
        let (system_msg, user_msg) = self.prompt_builder.build_chat(topic);

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature
        });

        let mut req = self.client.post(&url).json(&body);

        // Attach Authorization header only when api_key is a non-empty string.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("provider error: status={status} body={body}");
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::EmptyResponse)?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
