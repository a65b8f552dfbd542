//! Media inspection port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioAsset;

/// Media inspection errors.
/// Never surfaced to users: the duration probe absorbs them.
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("Unsupported audio format: {0}")]
    Unsupported(String),

    #[error("No audio track found")]
    NoAudioTrack,

    #[error("Duration not reported by the container")]
    DurationUnavailable,

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),
}

/// Port for reading a duration from container or codec headers
#[async_trait]
pub trait MetadataReader: Send + Sync {
    /// Read the duration, in seconds, announced by the media headers.
    ///
    /// The returned value is raw and may be NaN, infinite or non-positive;
    /// callers validate it.
    async fn read_duration(&self, asset: &AudioAsset) -> Result<f64, MediaError>;
}

/// Port for measuring a duration by decoding the whole stream
#[async_trait]
pub trait FullDecoder: Send + Sync {
    /// Decode every packet and return the decoded length in seconds.
    async fn decode_duration(&self, asset: &AudioAsset) -> Result<f64, MediaError>;
}
