//! Duration estimate value object

use std::fmt;

use super::asset::BYTES_PER_MB;

/// Seconds of audio assumed per started megabyte when nothing better is known
pub const SECONDS_PER_MB_ESTIMATE: u64 = 60;

/// Where a duration estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationSource {
    /// Read from container or codec headers
    MeasuredMetadata,
    /// Derived from decoding every packet
    MeasuredDecode,
    /// Guessed from the file size
    EstimatedFromSize,
}

impl DurationSource {
    /// Get the string identifier for this source
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MeasuredMetadata => "measured-metadata",
            Self::MeasuredDecode => "measured-decode",
            Self::EstimatedFromSize => "estimated-from-size",
        }
    }

    /// Whether the value was measured rather than guessed
    pub const fn is_measured(&self) -> bool {
        !matches!(self, Self::EstimatedFromSize)
    }
}

impl fmt::Display for DurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-second audio duration tagged with its source.
/// Zero means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationEstimate {
    seconds: u64,
    source: DurationSource,
}

impl DurationEstimate {
    /// Create an estimate from whole seconds
    pub const fn new(seconds: u64, source: DurationSource) -> Self {
        Self { seconds, source }
    }

    /// Validate a measured duration: finite and positive once floored
    pub fn from_measured(seconds: f64, source: DurationSource) -> Option<Self> {
        validated_seconds(seconds).map(|secs| Self::new(secs, source))
    }

    /// Conservative size-based estimate: one minute per started megabyte
    pub fn from_size(size_bytes: u64) -> Self {
        let started_mb = size_bytes.div_ceil(BYTES_PER_MB);
        Self::new(
            started_mb * SECONDS_PER_MB_ESTIMATE,
            DurationSource::EstimatedFromSize,
        )
    }

    /// Duration in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Where the value came from
    pub const fn source(&self) -> DurationSource {
        self.source
    }

    /// Whether the duration is unknown
    pub const fn is_unknown(&self) -> bool {
        self.seconds == 0
    }

    /// Minutes charged against a quota (partial minutes round up)
    pub const fn billable_minutes(&self) -> u64 {
        self.seconds.div_ceil(60)
    }
}

impl fmt::Display for DurationEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

/// Floor a raw duration to whole seconds, rejecting NaN, infinities and values ≤ 0
pub fn validated_seconds(seconds: f64) -> Option<u64> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let floored = seconds.floor();
    if floored < 1.0 {
        return None;
    }
    Some(floored as u64)
}
