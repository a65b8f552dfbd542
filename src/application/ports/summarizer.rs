//! Summarization port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::summary::Summary;

/// Summarization errors
#[derive(Debug, Clone, Error)]
pub enum SummarizationError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid JSON response from AI: {0}")]
    ParseError(String),

    #[error("Summary generation failed: {0}")]
    ApiError(String),
}

/// Port for turning a transcript into a titled markdown summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a transcript.
    ///
    /// Transcripts without usable content yield [`Summary::no_data`]
    /// without calling the model.
    async fn summarize(&self, transcript: &str) -> Result<Summary, SummarizationError>;
}
