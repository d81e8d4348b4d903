pub mod whisper;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for a speech-to-text engine.
///
/// Implementations distinguish rate limiting ([`ProviderError::RateLimited`])
/// and unusable audio ([`ProviderError::BadAudio`]) from other failures.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug + DynClone {
    /// Transcribes an audio payload of the given mime type into text.
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(TranscriptionProvider);
