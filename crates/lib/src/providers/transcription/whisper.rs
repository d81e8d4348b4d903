use crate::{
    audio::file_extension,
    errors::ProviderError,
    providers::{check_status, transcription::TranscriptionProvider},
};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client as ReqwestClient,
};
use std::time::Duration;
use tracing::info;

/// The public OpenAI transcription endpoint.
pub const OPENAI_TRANSCRIPTIONS_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// A provider for OpenAI-compatible `/audio/transcriptions` endpoints.
#[derive(Clone, Debug)]
pub struct WhisperProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: String,
    language: String,
}

impl WhisperProvider {
    /// Creates a new `WhisperProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: String,
        language: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            language,
        })
    }
}

#[async_trait]
impl TranscriptionProvider for WhisperProvider {
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String, ProviderError> {
        let file_name = format!("audio.{}", file_extension(mime_type));
        let file_part = Part::bytes(audio.to_vec())
            .file_name(file_name)
            .mime_str(mime_type)
            .map_err(ProviderError::AiRequest)?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "text");

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .multipart(form)
            .send()
            .await
            .map_err(ProviderError::AiRequest)?;

        let response = match check_status(response).await {
            Ok(response) => response,
            Err(ProviderError::AiApi { status, body })
                if status == 400 && body.to_lowercase().contains("audio") =>
            {
                return Err(ProviderError::BadAudio(body));
            }
            Err(e) => return Err(e),
        };

        let transcription = response
            .text()
            .await
            .map_err(ProviderError::AiDeserialization)?;

        info!(bytes = audio.len(), "Transcribed audio");
        Ok(transcription.trim().to_string())
    }
}
