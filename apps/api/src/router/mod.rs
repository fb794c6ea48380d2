//! Message Router — relays action-keyed requests between the untrusted UI
//! side and the privileged backend, mirroring the extension messaging
//! contract: exactly one response per recognized request (failures resolve
//! as error-shaped payloads), and unknown actions are ignored outright.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::llm_client::redact::{mask_api_key, redact_api_keys};
use crate::llm_client::LlmError;
use crate::models::job::JobData;
use crate::models::settings::{FreelancerProfile, Provider, ProviderConfig};
use crate::render::{markdown_to_html, CopyPayload};
use crate::state::AppState;
use crate::store::StoreError;

/// Appended to configuration errors so the user knows where to fix things.
const REMEDIATION_STEPS: &str = "\n\nTo configure your settings:\n\
    1. Open the extension options page\n\
    2. Fill in your API key and freelancer profile";

#[derive(Debug, Deserialize)]
#[serde(tag = "action")]
pub enum MessageRequest {
    #[serde(rename = "generateProposal")]
    GenerateProposal {
        #[serde(rename = "jobData")]
        job_data: JobData,
        /// Whether the caller can paste rich clipboard content. When false
        /// the copy payload falls back to plain text only.
        #[serde(rename = "richCopy", default = "default_rich_copy")]
        rich_copy: bool,
    },
    #[serde(rename = "saveCredentials")]
    SaveCredentials {
        #[serde(rename = "apiKey")]
        api_key: String,
        #[serde(rename = "aiProvider", default)]
        provider: Provider,
        #[serde(default)]
        model: Option<String>,
    },
    #[serde(rename = "getCredentials")]
    GetCredentials,
    #[serde(rename = "getProfile")]
    GetProfile,
    #[serde(rename = "saveProfile")]
    SaveProfile {
        #[serde(rename = "profileData")]
        profile_data: FreelancerProfile,
    },
}

/// Response payload. Only the fields relevant to the handled action are
/// serialized.
#[derive(Debug, Default, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<CopyPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "profileData", skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<FreelancerProfile>,
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(rename = "aiProvider", skip_serializing_if = "Option::is_none")]
    pub ai_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl MessageResponse {
    fn ok() -> Self {
        MessageResponse {
            success: true,
            ..Default::default()
        }
    }

    fn error(message: String) -> Self {
        MessageResponse {
            success: false,
            error: Some(redact_api_keys(&message)),
            ..Default::default()
        }
    }
}

/// Dispatches one raw message. Returns `None` for unknown actions (no
/// response is sent); every recognized action resolves to exactly one
/// response, error-shaped on failure.
pub async fn dispatch(state: &AppState, message: Value) -> Option<MessageResponse> {
    let action = message.get("action").and_then(Value::as_str)?.to_string();

    let request: MessageRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            if is_known_action(&action) {
                // Recognized action with a bad payload still gets a reply.
                return Some(MessageResponse::error(format!(
                    "Invalid payload for action '{action}': {e}"
                )));
            }
            debug!("Ignoring unknown message action: {action}");
            return None;
        }
    };

    let response = match request {
        MessageRequest::GenerateProposal {
            job_data,
            rich_copy,
        } => handle_generate_proposal(state, job_data, rich_copy).await,
        MessageRequest::SaveCredentials {
            api_key,
            provider,
            model,
        } => handle_save_credentials(state, api_key, provider, model).await,
        MessageRequest::GetCredentials => handle_get_credentials(state).await,
        MessageRequest::GetProfile => handle_get_profile(state).await,
        MessageRequest::SaveProfile { profile_data } => {
            handle_save_profile(state, profile_data).await
        }
    };
    Some(response)
}

fn default_rich_copy() -> bool {
    true
}

fn is_known_action(action: &str) -> bool {
    matches!(
        action,
        "generateProposal" | "saveCredentials" | "getCredentials" | "getProfile" | "saveProfile"
    )
}

async fn handle_generate_proposal(
    state: &AppState,
    job_data: JobData,
    rich_copy: bool,
) -> MessageResponse {
    let config = match state.credentials.load().await {
        Ok(config) => config,
        Err(e) => return store_error_response(e),
    };
    let profile = match state.profiles.load().await {
        Ok(profile) => profile,
        Err(e) => return store_error_response(e),
    };

    info!(
        provider = config.provider.as_str(),
        model = %config.model,
        skills = job_data.skills.len(),
        "Generating proposal"
    );

    match state.llm.generate(&job_data, &profile, &config).await {
        Ok(proposal) => {
            let payload = if rich_copy {
                CopyPayload::rich(&proposal)
            } else {
                CopyPayload::plain_only(&proposal)
            };
            MessageResponse {
                success: true,
                html: Some(markdown_to_html(&proposal)),
                proposal: Some(proposal),
                copy: Some(payload),
                ..Default::default()
            }
        }
        Err(e) => {
            error!("Error generating proposal: {}", redact_api_keys(&e.to_string()));
            MessageResponse::error(user_facing_error(e))
        }
    }
}

/// Configuration errors go out verbatim with remediation steps attached;
/// upstream, transport, and timeout errors are wrapped as a generation
/// failure.
fn user_facing_error(e: LlmError) -> String {
    if e.is_configuration() {
        format!("{e}{REMEDIATION_STEPS}")
    } else {
        format!("Failed to generate proposal: {e}")
    }
}

async fn handle_save_credentials(
    state: &AppState,
    api_key: String,
    provider: Provider,
    model: Option<String>,
) -> MessageResponse {
    let config = ProviderConfig {
        provider,
        model: model.unwrap_or_else(|| provider.default_model().to_string()),
        api_key,
    };
    if !config.key_matches_provider() {
        // Warn-only: a mismatched key is stored and later attempted as-is.
        tracing::warn!(
            provider = provider.as_str(),
            "Saved API key does not start with the expected '{}' prefix",
            provider.expected_key_prefix()
        );
    }
    match state.credentials.save(&config).await {
        Ok(()) => {
            info!(
                provider = provider.as_str(),
                key = %mask_api_key(&config.api_key),
                "Credentials saved"
            );
            MessageResponse::ok()
        }
        Err(e) => store_error_response(e),
    }
}

async fn handle_get_credentials(state: &AppState) -> MessageResponse {
    match state.credentials.load().await {
        Ok(config) => MessageResponse {
            success: true,
            api_key: Some(config.api_key),
            ai_provider: Some(config.provider.as_str().to_string()),
            model: Some(config.model),
            ..Default::default()
        },
        Err(e) => store_error_response(e),
    }
}

async fn handle_get_profile(state: &AppState) -> MessageResponse {
    match state.profiles.load().await {
        Ok(profile) => MessageResponse {
            success: true,
            profile_data: Some(profile),
            ..Default::default()
        },
        Err(e) => store_error_response(e),
    }
}

async fn handle_save_profile(state: &AppState, profile: FreelancerProfile) -> MessageResponse {
    match state.profiles.save(&profile).await {
        Ok(()) => MessageResponse::ok(),
        Err(e) => store_error_response(e),
    }
}

fn store_error_response(e: StoreError) -> MessageResponse {
    error!("Settings store failure: {e}");
    MessageResponse::error(e.to_string())
}
