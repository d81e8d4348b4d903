//! # AI Provider Factory
//!
//! This module turns provider settings into boxed provider instances. The
//! settings structs deserialize straight out of a configuration file, so any
//! consumer (the CLI, a server, tests) builds providers the same way.

use crate::{
    errors::ProviderError,
    providers::{
        ai::{
            anthropic::{AnthropicProvider, ANTHROPIC_MESSAGES_URL},
            gemini::GeminiProvider,
            local::LocalAiProvider,
            CompletionProvider,
        },
        transcription::{
            whisper::{WhisperProvider, OPENAI_TRANSCRIPTIONS_URL},
            TranscriptionProvider,
        },
    },
};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Settings for the text-completion provider.
#[derive(Debug, Deserialize, Clone)]
pub struct CompletionSettings {
    /// The type of provider: "anthropic", "local" or "gemini".
    #[serde(default = "default_completion_provider")]
    pub provider: String,
    /// The API URL. Optional for providers with a well-known endpoint.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_completion_model")]
    pub model_name: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings for the speech-to-text provider.
#[derive(Debug, Deserialize, Clone)]
pub struct TranscriptionSettings {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_transcription_model")]
    pub model_name: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_completion_provider() -> String {
    "anthropic".to_string()
}

fn default_completion_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            provider: default_completion_provider(),
            api_url: None,
            api_key: None,
            model_name: default_completion_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model_name: default_transcription_model(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Creates the completion provider described by `settings`.
pub fn create_completion_provider(
    settings: &CompletionSettings,
) -> Result<Box<dyn CompletionProvider>, ProviderError> {
    let timeout = Duration::from_secs(settings.timeout_secs);
    let provider: Box<dyn CompletionProvider> = match settings.provider.as_str() {
        "anthropic" => {
            let api_key = settings.api_key.clone().ok_or_else(|| {
                ProviderError::MissingProvider(
                    "api_key is required for the anthropic provider".to_string(),
                )
            })?;
            let api_url = settings
                .api_url
                .clone()
                .unwrap_or_else(|| ANTHROPIC_MESSAGES_URL.to_string());
            info!(%api_url, model = %settings.model_name, "Configuring Anthropic provider");
            Box::new(AnthropicProvider::new(
                api_url,
                api_key,
                settings.model_name.clone(),
                timeout,
            )?)
        }
        "gemini" => {
            let api_key = settings.api_key.clone().ok_or_else(|| {
                ProviderError::MissingProvider(
                    "api_key is required for the gemini provider".to_string(),
                )
            })?;
            // If api_url is not provided, construct it from the model name.
            let api_url = settings
                .api_url
                .clone()
                .unwrap_or_else(|| GeminiProvider::endpoint_for(&settings.model_name));
            info!(%api_url, "Configuring Gemini provider");
            Box::new(GeminiProvider::new(api_url, api_key, timeout)?)
        }
        "local" => {
            // For local providers, the URL is always required.
            let api_url = settings.api_url.clone().ok_or_else(|| {
                ProviderError::MissingProvider(
                    "api_url is required for the local provider".to_string(),
                )
            })?;
            info!(%api_url, "Configuring local AI provider");
            Box::new(LocalAiProvider::new(
                api_url,
                settings.api_key.clone(),
                Some(settings.model_name.clone()),
                timeout,
            )?)
        }
        other => {
            return Err(ProviderError::MissingProvider(format!(
                "unsupported completion provider type '{other}'"
            )))
        }
    };
    Ok(provider)
}

/// Creates the transcription provider described by `settings`.
pub fn create_transcription_provider(
    settings: &TranscriptionSettings,
) -> Result<Box<dyn TranscriptionProvider>, ProviderError> {
    let api_url = settings
        .api_url
        .clone()
        .unwrap_or_else(|| OPENAI_TRANSCRIPTIONS_URL.to_string());
    info!(%api_url, model = %settings.model_name, "Configuring transcription provider");
    Ok(Box::new(WhisperProvider::new(
        api_url,
        settings.api_key.clone(),
        settings.model_name.clone(),
        settings.language.clone(),
        Duration::from_secs(settings.timeout_secs),
    )?))
}
