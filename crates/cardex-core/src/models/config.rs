//! Configuration structures for the extraction pipeline and model provider.

use serde::{Deserialize, Serialize};

use crate::error::{CardexError, Result};
use crate::provider::DEFAULT_PROMPT_PREFIX;

/// Main configuration for cardex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardexConfig {
    /// Extraction pipeline configuration.
    pub extraction: ExtractionConfig,

    /// Model provider configuration.
    pub provider: ProviderConfig,
}

/// Extraction pipeline switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Quote unquoted numeric `*phone_number` values before parsing JSON.
    pub quote_phone_numbers: bool,

    /// Append missing closing braces to truncated JSON.
    pub balance_braces: bool,

    /// Fix the `@egmail.com` typo when the model hedged with "assuming".
    pub correct_email_typos: bool,

    /// Remove a surname the model echoed at the end of the name.
    pub strip_echoed_surname: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            quote_phone_numbers: true,
            balance_braces: true,
            correct_email_typos: true,
            strip_echoed_surname: true,
        }
    }
}

/// Supported model provider APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Workspace chat API returning `textResponse`.
    #[default]
    AnythingLlm,
    /// Ollama generate API returning `response`.
    Ollama,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::AnythingLlm => write!(f, "anything_llm"),
            ProviderKind::Ollama => write!(f, "ollama"),
        }
    }
}

/// Model provider connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Which provider API to speak.
    pub kind: ProviderKind,

    /// Base URL of the provider.
    pub base_url: String,

    /// Workspace slug (AnythingLLM only).
    pub workspace: String,

    /// Model name (Ollama only).
    pub model: String,

    /// API key. Falls back to the `api_key_env` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Chat mode sent with workspace chat requests.
    pub mode: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Instruction line prepended to every card text.
    pub prompt_prefix: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::AnythingLlm,
            base_url: "http://localhost:3001/api/v1/workspace".to_string(),
            workspace: "business-cards".to_string(),
            model: "llama3.2:latest".to_string(),
            api_key: None,
            api_key_env: "CARDEX_API_KEY".to_string(),
            mode: "chat".to_string(),
            timeout_secs: 120,
            prompt_prefix: DEFAULT_PROMPT_PREFIX.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl CardexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CardexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CardexConfig =
            serde_json::from_str(r#"{"provider": {"kind": "ollama"}}"#).unwrap();

        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model, "llama3.2:latest");
        assert!(config.extraction.balance_braces);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CardexConfig::default();
        config.extraction.strip_echoed_surname = false;
        config.provider.workspace = "cards".to_string();
        config.save(&path).unwrap();

        let loaded = CardexConfig::from_file(&path).unwrap();
        assert!(!loaded.extraction.strip_echoed_surname);
        assert_eq!(loaded.provider.workspace, "cards");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = CardexConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CardexError::Config(_)));
    }

    #[test]
    fn test_api_key_from_config_wins() {
        let provider = ProviderConfig {
            api_key: Some("secret".to_string()),
            api_key_env: "CARDEX_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key().as_deref(), Some("secret"));

        let provider = ProviderConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "CARDEX_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key(), None);
    }
}
