//! Audio domain module

mod asset;
mod duration;

pub use asset::{media_type_for, AudioAsset, BYTES_PER_MB};
pub use duration::{validated_seconds, DurationEstimate, DurationSource, SECONDS_PER_MB_ESTIMATE};
