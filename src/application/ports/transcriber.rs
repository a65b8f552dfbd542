//! Transcription port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioAsset;
use crate::domain::transcription::{SystemPrompt, Transcript};

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty transcription response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Callback receiving human-readable progress messages during transcription
pub type TranscriptionProgress = Arc<dyn Fn(&str) + Send + Sync>;

/// Port for audio transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio asset.
    ///
    /// # Arguments
    /// * `asset` - The audio to transcribe
    /// * `prompt` - The transcription instructions
    /// * `on_progress` - Receives intermediate status messages
    ///
    /// # Returns
    /// The transcript, with the audio duration when the service measures one
    async fn transcribe(
        &self,
        asset: &AudioAsset,
        prompt: &SystemPrompt,
        on_progress: TranscriptionProgress,
    ) -> Result<Transcript, TranscriptionError>;
}
