use crate::{
    errors::ProviderError,
    providers::{
        ai::{Completion, CompletionProvider, CompletionRequest, ContentBlock},
        check_status,
    },
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct LocalAiRequest<'a> {
    messages: Vec<LocalAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct LocalAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct LocalAiResponse {
    #[serde(default)]
    choices: Vec<LocalAiChoice>,
}

#[derive(Deserialize, Debug)]
struct LocalAiChoice {
    message: LocalAiMessage,
}

// --- Local Provider implementation ---

/// A provider for interacting with a local or OpenAI-compatible chat completions API.
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl LocalAiProvider {
    /// Creates a new `LocalAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
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
        })
    }
}

#[async_trait]
impl CompletionProvider for LocalAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let request_body = LocalAiRequest {
            messages: vec![LocalAiMessage {
                role: "user".to_string(),
                content: Some(request.prompt.clone()),
            }],
            model: self.model.as_deref(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::AiRequest)?;

        let response = check_status(response).await?;

        let local_ai_response: LocalAiResponse = response
            .json()
            .await
            .map_err(ProviderError::AiDeserialization)?;

        // A choice without string content (e.g. a tool call) is not text.
        let content = local_ai_response
            .choices
            .into_iter()
            .take(1)
            .map(|choice| match choice.message.content {
                Some(text) => ContentBlock::Text(text),
                None => ContentBlock::Other("tool_calls".to_string()),
            })
            .collect();

        Ok(Completion { content })
    }
}
