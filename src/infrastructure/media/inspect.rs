//! Symphonia-based media inspection
//!
//! Both adapters work on the in-memory bytes and run on the blocking pool.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::application::ports::{FullDecoder, MediaError, MetadataReader};
use crate::domain::audio::AudioAsset;

/// Reads the duration announced by the container headers
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaMetadataReader;

/// Measures the duration by decoding every packet
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

#[async_trait]
impl MetadataReader for SymphoniaMetadataReader {
    async fn read_duration(&self, asset: &AudioAsset) -> Result<f64, MediaError> {
        let data = asset.shared_data();
        let extension = asset.extension();
        run_blocking(move || header_duration(data, extension.as_deref())).await
    }
}

#[async_trait]
impl FullDecoder for SymphoniaDecoder {
    async fn decode_duration(&self, asset: &AudioAsset) -> Result<f64, MediaError> {
        let data = asset.shared_data();
        let extension = asset.extension();
        run_blocking(move || decoded_duration(data, extension.as_deref())).await
    }
}

async fn run_blocking<F>(work: F) -> Result<f64, MediaError>
where
    F: FnOnce() -> Result<f64, MediaError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| MediaError::DecodeFailed(e.to_string()))?
}

fn open(data: Arc<[u8]>, extension: Option<&str>) -> Result<Box<dyn FormatReader>, MediaError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = extension {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(map_error)?;

    Ok(probed.format)
}

fn header_duration(data: Arc<[u8]>, extension: Option<&str>) -> Result<f64, MediaError> {
    let format = open(data, extension)?;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(MediaError::NoAudioTrack)?;
    let params = &track.codec_params;

    let n_frames = params.n_frames.ok_or(MediaError::DurationUnavailable)?;

    let seconds = if let Some(time_base) = params.time_base {
        let time = time_base.calc_time(n_frames);
        time.seconds as f64 + time.frac
    } else if let Some(rate) = params.sample_rate {
        n_frames as f64 / rate as f64
    } else {
        return Err(MediaError::DurationUnavailable);
    };

    debug!(n_frames, seconds, "Duration from container headers");
    Ok(seconds)
}

fn decoded_duration(data: Arc<[u8]>, extension: Option<&str>) -> Result<f64, MediaError> {
    let mut format = open(data, extension)?;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(MediaError::NoAudioTrack)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(map_error)?;

    let mut frames: u64 = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(map_error(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_rate.is_none() {
                    sample_rate = Some(decoded.spec().rate);
                }
                frames += decoded.frames() as u64;
            }
            // Corrupt packets are skipped
            Err(SymphoniaError::DecodeError(e)) => debug!(error = e, "Skipping undecodable packet"),
            Err(e) => return Err(map_error(e)),
        }
    }

    let rate = sample_rate.ok_or(MediaError::DurationUnavailable)?;
    let seconds = frames as f64 / rate as f64;

    debug!(frames, rate, seconds, "Duration from full decode");
    Ok(seconds)
}

fn map_error(err: SymphoniaError) -> MediaError {
    match err {
        SymphoniaError::Unsupported(what) => MediaError::Unsupported(what.to_string()),
        other => MediaError::DecodeFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mono 16-bit PCM WAV of silence
    fn wav(sample_rate: u32, frames: u32) -> Vec<u8> {
        let data_len = frames * 2;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        out.resize(44 + data_len as usize, 0);
        out
    }

    fn asset(bytes: Vec<u8>) -> AudioAsset {
        AudioAsset::new("tone.wav", "audio/wav", bytes).unwrap()
    }

    #[tokio::test]
    async fn header_duration_of_wav() {
        let seconds = SymphoniaMetadataReader
            .read_duration(&asset(wav(8000, 16000)))
            .await
            .unwrap();
        assert!((seconds - 2.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn decoded_duration_of_wav() {
        let seconds = SymphoniaDecoder
            .decode_duration(&asset(wav(8000, 12000)))
            .await
            .unwrap();
        assert!((seconds - 1.5).abs() < 1e-6);
    }

    #[tokio::test]
    async fn garbage_is_an_error() {
        let bytes = b"definitely not audio".repeat(10);
        assert!(SymphoniaMetadataReader.read_duration(&asset(bytes.clone())).await.is_err());
        assert!(SymphoniaDecoder.decode_duration(&asset(bytes)).await.is_err());
    }
}
