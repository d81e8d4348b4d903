pub mod anthropic;
pub mod gemini;
pub mod local;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A single completion request: one user prompt plus sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One block of a provider's response.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Plain text output.
    Text(String),
    /// Any non-text block (tool calls, images, ...), identified by its type tag.
    Other(String),
}

impl ContentBlock {
    /// The type tag of the block as reported by the provider.
    pub fn kind(&self) -> &str {
        match self {
            ContentBlock::Text(_) => "text",
            ContentBlock::Other(kind) => kind,
        }
    }
}

/// The content blocks returned by a completion provider, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub content: Vec<ContentBlock>,
}

impl Completion {
    /// A completion holding a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
        }
    }
}

/// A trait for interacting with a text-completion provider.
///
/// Implementations own their HTTP client, credentials and timeout. A timeout
/// surfaces as an ordinary [`ProviderError`].
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug + DynClone {
    /// Issues one completion call and returns the response's content blocks.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}

dyn_clone::clone_trait_object!(CompletionProvider);
