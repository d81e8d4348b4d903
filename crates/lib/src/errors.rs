use crate::dispatch::StoredEntry;
use std::fmt;
use thiserror::Error;

/// Errors raised by the external AI collaborators (completion and transcription).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error (status {status}): {body}")]
    AiApi { status: u16, body: String },
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("Invalid audio format: {0}")]
    BadAudio(String),
    #[error("AI provider is not configured: {0}")]
    MissingProvider(String),
}

/// Failure to recover a JSON object from a raw completion.
#[derive(Error, Debug)]
pub enum CompletionParseError {
    /// No `{ ... }` span exists in the completion text.
    #[error("No JSON object found in completion")]
    Format,
    /// A span was found but it is not valid JSON.
    #[error("Invalid JSON in completion: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The AI subsystem a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiService {
    /// The speech-to-text collaborator.
    Transcription,
    /// The text-completion collaborator.
    Completion,
}

impl AiService {
    /// Short tag used in error codes and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            AiService::Transcription => "whisper",
            AiService::Completion => "claude",
        }
    }
}

impl fmt::Display for AiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The underlying cause of an `AiProcessing` error.
#[derive(Error, Debug)]
pub enum AiFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Empty transcription received")]
    EmptyTranscription,
    #[error("Unexpected response type from completion provider: {0}")]
    UnexpectedResponseType(String),
    #[error(transparent)]
    Completion(#[from] CompletionParseError),
}

/// Errors returned by the persistence collaborators.
///
/// The pipeline never inspects these; they are passed through to the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Top-level error for the extraction-and-dispatch pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    InvalidAudio(String),
    #[error("No text provided")]
    EmptyInput,
    #[error("AI processing failed ({service}): {source}")]
    AiProcessing {
        service: AiService,
        #[source]
        source: AiFailure,
    },
    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),
    /// A store call failed after earlier writes of the same request succeeded.
    /// `created` holds those writes; they are not rolled back.
    #[error("Persistence failed after writing {} entries: {source}", .created.len())]
    PartialWrite {
        created: Vec<StoredEntry>,
        #[source]
        source: StoreError,
    },
}

impl PipelineError {
    pub(crate) fn ai(service: AiService, source: impl Into<AiFailure>) -> Self {
        PipelineError::AiProcessing {
            service,
            source: source.into(),
        }
    }

    /// A stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InvalidAudio(_) => "INVALID_AUDIO",
            PipelineError::EmptyInput => "NO_INPUT",
            PipelineError::AiProcessing { service, .. } => match service {
                AiService::Transcription => "AI_WHISPER_ERROR",
                AiService::Completion => "AI_CLAUDE_ERROR",
            },
            PipelineError::Store(_) | PipelineError::PartialWrite { .. } => "DATABASE_ERROR",
        }
    }
}
