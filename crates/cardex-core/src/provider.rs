//! Wire types for the model provider round trip.
//!
//! The HTTP call itself lives with the host (the CLI); this module only
//! builds request bodies and reads responses, so it stays usable from WASM.

use serde::{Deserialize, Serialize};

use crate::error::{CardexError, Result};
use crate::models::config::{ProviderConfig, ProviderKind};

/// Instruction line prepended to the card text.
pub const DEFAULT_PROMPT_PREFIX: &str =
    "find to \"full name\", \"titles\", \"organization\", \"phone\", \"email\", \"address\", \"webAddress\"";

/// Workspace chat request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub mode: String,
}

/// Workspace chat response body. Only the model text is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub text_response: Option<String>,
}

/// Generate request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

/// Envelope emitted by raw mode: the unparsed model text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResponse {
    pub raw_text: String,
}

/// A provider request ready to send.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub body: serde_json::Value,
    /// Bearer token, when one is configured.
    pub api_key: Option<String>,
}

/// Prefix the card text with the extraction instruction.
pub fn build_prompt(prefix: &str, message: &str) -> String {
    if prefix.trim().is_empty() {
        message.to_string()
    } else {
        format!("{prefix}\n{message}")
    }
}

/// Endpoint for the configured provider.
pub fn endpoint_url(config: &ProviderConfig) -> String {
    let base = config.base_url.trim_end_matches('/');
    match config.kind {
        ProviderKind::AnythingLlm => format!("{}/{}/chat", base, config.workspace),
        ProviderKind::Ollama => format!("{}/api/generate", base),
    }
}

/// Validate the card text and build the request for the configured provider.
pub fn build_request(config: &ProviderConfig, message: &str) -> Result<ProviderRequest> {
    if message.trim().is_empty() {
        return Err(CardexError::Provider("message must not be empty".to_string()));
    }

    let api_key = config.resolve_api_key();
    let prompt = build_prompt(&config.prompt_prefix, message);

    let body = match config.kind {
        ProviderKind::AnythingLlm => {
            if api_key.is_none() {
                return Err(CardexError::Provider(format!(
                    "no API key configured (set provider.api_key or {})",
                    config.api_key_env
                )));
            }
            let mode = if config.mode.trim().is_empty() { "chat" } else { config.mode.as_str() };
            serde_json::to_value(ChatRequest {
                message: prompt,
                mode: mode.to_string(),
            })?
        }
        ProviderKind::Ollama => serde_json::to_value(GenerateRequest {
            model: config.model.clone(),
            prompt,
            stream: false,
        })?,
    };

    Ok(ProviderRequest {
        url: endpoint_url(config),
        body,
        api_key,
    })
}

/// Pull the model text out of a successful response body.
///
/// Workspace chat answers carry it in `textResponse`; an absent or blank value
/// yields an empty string. Generate answers are returned whole, since the
/// envelope unwrapper strips their `response` wrapper.
pub fn extract_text_response(kind: ProviderKind, body: &str) -> Result<String> {
    match kind {
        ProviderKind::AnythingLlm => {
            let response: ChatResponse = serde_json::from_str(body)?;
            Ok(response.text_response.unwrap_or_default())
        }
        ProviderKind::Ollama => Ok(body.to_string()),
    }
}
