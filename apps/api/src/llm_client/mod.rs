//! Proposal Client — the single point of entry for all LLM calls.
//!
//! No other module may call a provider API directly. Every error produced
//! here carries already-redacted text; nothing key-shaped leaves this
//! module in a message.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod redact;

use crate::generation::build_prompt;
use crate::models::job::JobData;
use crate::models::settings::{FreelancerProfile, ProviderConfig};
use redact::redact_api_keys;

/// System role for every generation call.
pub const SYSTEM_PROMPT: &str = "You are an expert freelance proposal writer \
    who creates personalized, compelling proposals for marketplace jobs.";

/// Sampling temperature, fixed for all calls.
pub const TEMPERATURE: f64 = 0.7;
/// Output token ceiling, not user-configurable.
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing API key or incomplete freelancer profile. Raised before any
    /// network I/O is attempted.
    #[error("{0}")]
    NotConfigured(String),

    /// Non-success HTTP response from the provider (message redacted).
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level failure (message redacted).
    #[error("Request failed: {0}")]
    Http(String),

    /// The request exceeded its deadline. Distinct from `Http` so callers
    /// can tell a hung provider from a broken connection.
    #[error("Request timed out before the provider responded")]
    Timeout,

    #[error("Provider returned no proposal content")]
    EmptyContent,
}

impl LlmError {
    /// Configuration errors are surfaced verbatim with remediation hints;
    /// everything else is wrapped as a generation failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::NotConfigured(_))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Stateless client for the providers' chat-completion endpoints. The
/// provider configuration is passed into every call rather than held as
/// mutable client state.
#[derive(Clone)]
pub struct ProposalClient {
    client: Client,
    request_timeout: Duration,
}

impl ProposalClient {
    pub fn new(request_timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            // Per-request timeout is applied in generate(); the builder
            // carries no default so the deadline is explicit at the call.
            client: Client::builder().build()?,
            request_timeout,
        })
    }

    /// Generates a proposal for `job` using `profile` and `config`.
    ///
    /// Fails fast with `NotConfigured` before any network I/O when the API
    /// key is missing or the profile lacks experience/specialty. A key that
    /// does not match the provider's expected prefix is warned about but
    /// the call is still attempted.
    pub async fn generate(
        &self,
        job: &JobData,
        profile: &FreelancerProfile,
        config: &ProviderConfig,
    ) -> Result<String, LlmError> {
        if config.api_key.is_empty() || !config.api_key.starts_with("sk-") {
            return Err(LlmError::NotConfigured(
                "API key is not configured. Please set up your API key in the settings."
                    .to_string(),
            ));
        }
        if !profile.is_complete() {
            return Err(LlmError::NotConfigured(
                "Freelancer profile information (experience and specialty) is required. \
                 Please configure your profile in the settings."
                    .to_string(),
            ));
        }
        if !config.key_matches_provider() {
            warn!(
                provider = config.provider.as_str(),
                "API key does not match the expected '{}' prefix; attempting the call anyway",
                config.provider.expected_key_prefix()
            );
        }

        let prompt = build_prompt(job, profile);
        self.send_chat_request(config.provider.endpoint(), &prompt, config)
            .await
    }

    /// One outbound request, no retries. A failed call surfaces immediately.
    async fn send_chat_request(
        &self,
        url: &str,
        prompt: &str,
        config: &ProviderConfig,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(
            provider = config.provider.as_str(),
            model = %config.model,
            prompt_len = prompt.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .header("content-type", "application/json")
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_error_message(&body, status);
            warn!("Provider returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Http(redact_api_keys(&e.to_string())))?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(content.to_string())
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Http(redact_api_keys(&e.to_string()))
    }
}

/// Extracts the provider's error message from a failure body, falling back
/// to the HTTP status text. Always redacted.
fn provider_error_message(body: &str, status: reqwest::StatusCode) -> String {
    let message = serde_json::from_str::<ProviderErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    redact_api_keys(&message)
}
