//! Duration probe use case
//!
//! Produces a best-effort duration for an audio asset by trying, in order,
//! the media headers, a full decode, and finally a size-based estimate.
//! The first strategy that yields a valid value wins.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::audio::{AudioAsset, DurationEstimate, DurationSource};

use super::ports::{FullDecoder, MetadataReader};

/// How long the metadata strategy may take before it is abandoned
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(8);

/// Duration probe with a metadata reader and a full decoder
pub struct DurationProbe<M, D>
where
    M: MetadataReader,
    D: FullDecoder,
{
    metadata: M,
    decoder: D,
    metadata_timeout: Duration,
}

impl<M, D> DurationProbe<M, D>
where
    M: MetadataReader,
    D: FullDecoder,
{
    /// Create a probe with the default metadata timeout
    pub fn new(metadata: M, decoder: D) -> Self {
        Self {
            metadata,
            decoder,
            metadata_timeout: METADATA_TIMEOUT,
        }
    }

    /// Override the metadata timeout
    pub fn with_metadata_timeout(mut self, metadata_timeout: Duration) -> Self {
        self.metadata_timeout = metadata_timeout;
        self
    }

    /// Estimate the duration of `asset`. Never fails.
    ///
    /// An empty asset yields an unknown (zero) estimate.
    pub async fn probe(&self, asset: &AudioAsset) -> DurationEstimate {
        if let Some(estimate) = self.try_metadata(asset).await {
            return estimate;
        }

        if let Some(estimate) = self.try_decode(asset).await {
            return estimate;
        }

        let estimate = DurationEstimate::from_size(asset.size_bytes());
        warn!(
            file = asset.name(),
            size = %asset.human_readable_size(),
            seconds = estimate.as_secs(),
            "Duration estimated from file size"
        );
        estimate
    }

    async fn try_metadata(&self, asset: &AudioAsset) -> Option<DurationEstimate> {
        debug!(file = asset.name(), "Reading duration from metadata");

        // A result arriving after the timeout is dropped with the future;
        // adapters doing blocking work keep running detached.
        let raw = match timeout(self.metadata_timeout, self.metadata.read_duration(asset)).await {
            Ok(Ok(seconds)) => seconds,
            Ok(Err(e)) => {
                warn!(file = asset.name(), error = %e, "Metadata read failed, trying full decode");
                return None;
            }
            Err(_) => {
                warn!(
                    file = asset.name(),
                    timeout_secs = self.metadata_timeout.as_secs_f64(),
                    "Metadata read timed out, trying full decode"
                );
                return None;
            }
        };

        match DurationEstimate::from_measured(raw, DurationSource::MeasuredMetadata) {
            Some(estimate) => {
                info!(file = asset.name(), seconds = estimate.as_secs(), "Duration read from metadata");
                Some(estimate)
            }
            None => {
                warn!(file = asset.name(), raw, "Invalid metadata duration, trying full decode");
                None
            }
        }
    }

    async fn try_decode(&self, asset: &AudioAsset) -> Option<DurationEstimate> {
        debug!(file = asset.name(), "Decoding audio to measure duration");

        let raw = match self.decoder.decode_duration(asset).await {
            Ok(seconds) => seconds,
            Err(e) => {
                warn!(file = asset.name(), error = %e, "Full decode failed");
                return None;
            }
        };

        match DurationEstimate::from_measured(raw, DurationSource::MeasuredDecode) {
            Some(estimate) => {
                info!(file = asset.name(), seconds = estimate.as_secs(), "Duration measured by decoding");
                Some(estimate)
            }
            None => {
                warn!(file = asset.name(), raw, "Invalid decoded duration");
                None
            }
        }
    }
}
