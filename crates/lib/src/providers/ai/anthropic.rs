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
use tracing::debug;

/// The public Messages API endpoint.
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// --- Messages API request and response structures ---

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize, Debug)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

// --- Anthropic Provider implementation ---

/// A provider for the Anthropic Messages API.
#[derive(Clone, Debug)]
pub struct AnthropicProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    /// Creates a new `AnthropicProvider` whose requests time out after `timeout`.
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
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
impl CompletionProvider for AnthropicProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::AiRequest)?;

        let response = check_status(response).await?;

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(ProviderError::AiDeserialization)?;
        debug!(blocks = messages_response.content.len(), "<-- Anthropic response");

        let content = messages_response
            .content
            .into_iter()
            .map(|block| match (block.kind.as_str(), block.text) {
                ("text", Some(text)) => ContentBlock::Text(text),
                _ => ContentBlock::Other(block.kind),
            })
            .collect();

        Ok(Completion { content })
    }
}
