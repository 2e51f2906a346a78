//! Builds concrete clients from provider configuration.

use super::clients::{GeminiClient, OllamaClient, OpenAIClient};
use super::traits::ModelClient;
use crate::config::ModelProviderConfig;
use std::env;
use tracing::warn;

/// Resolve an API key from the environment. The configured value names an
/// environment variable, either bare (`GEMINI_API_KEY`) or in `${VAR}`
/// syntax; the key itself never lives in the config file.
pub fn resolve_api_key(provider: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim).filter(|value| !value.is_empty())?;
    let var = raw
        .strip_prefix("${")
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(raw);

    match env::var(var) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = var,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a model client based on provider type.
    ///
    /// Supported types:
    /// - `ollama`, `localai` → Ollama format
    /// - `gemini`, `google`, `google-ai` → Gemini format
    /// - Others → OpenAI-compatible format (default)
    pub fn create(config: &ModelProviderConfig) -> Box<dyn ModelClient> {
        match config.provider_type.to_lowercase().as_str() {
            "ollama" | "localai" => Box::new(OllamaClient::from_config(config)),
            "gemini" | "google" | "google-ai" => Box::new(GeminiClient::from_config(config)),
            _ => Box::new(OpenAIClient::from_config(config)),
        }
    }
}
