//! Audio asset value object

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::domain::error::InvalidFileTypeError;

/// Bytes per megabyte used by size-based estimates and display
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Media type prefixes accepted without looking at the file name
const ACCEPTED_MEDIA_PREFIXES: &[&str] = &["audio/", "video/webm", "video/mp4", "video/ogg"];

/// File extensions accepted regardless of the declared media type
const ACCEPTED_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "webm", "ogg", "flac", "aac", "wma"];

/// Value object representing an uploaded audio file.
/// Lives only for the duration of one upload session; clones share the bytes.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    name: String,
    media_type: String,
    data: Arc<[u8]>,
}

impl AudioAsset {
    /// Create an asset, rejecting files that are neither audio nor a known audio extension
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<Self, InvalidFileTypeError> {
        let name = name.into();
        let media_type = media_type.into();

        if !is_accepted(&name, &media_type) {
            return Err(InvalidFileTypeError { name, media_type });
        }

        Ok(Self {
            name,
            media_type,
            data: data.into(),
        })
    }

    /// Create an asset from a file name, inferring the media type from the extension
    pub fn from_named_bytes(
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<Self, InvalidFileTypeError> {
        let name = name.into();
        let media_type = media_type_for(&name).unwrap_or("application/octet-stream");
        Self::new(name, media_type, data)
    }

    /// Original file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Shared handle to the bytes, for work that outlives the borrow
    pub fn shared_data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Lower-cased file extension, if any
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    /// Size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the asset has no content
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size formatted as megabytes with two decimals (e.g. "2.00 MB")
    pub fn human_readable_size(&self) -> String {
        format!("{:.2} MB", self.size_bytes() as f64 / BYTES_PER_MB as f64)
    }

    /// Encode the audio data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&*self.data)
    }
}

impl fmt::Display for AudioAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.human_readable_size())
    }
}

fn is_accepted(name: &str, media_type: &str) -> bool {
    let media_type = media_type.to_ascii_lowercase();
    if ACCEPTED_MEDIA_PREFIXES
        .iter()
        .any(|prefix| media_type.starts_with(prefix))
    {
        return true;
    }

    extension_of(name)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Media type for a known audio file extension
pub fn media_type_for(name: &str) -> Option<&'static str> {
    let media_type = match extension_of(name)?.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "wma" => "audio/x-ms-wma",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_audio_media_types() {
        assert!(AudioAsset::new("meeting.bin", "audio/mpeg", vec![1]).is_ok());
        assert!(AudioAsset::new("meeting", "AUDIO/WAV", vec![1]).is_ok());
    }

    #[test]
    fn accepts_video_containers_carrying_audio() {
        assert!(AudioAsset::new("call", "video/webm", vec![1]).is_ok());
        assert!(AudioAsset::new("call", "video/mp4", vec![1]).is_ok());
        assert!(AudioAsset::new("call", "video/ogg", vec![1]).is_ok());
    }

    #[test]
    fn accepts_known_extension_with_generic_type() {
        let asset = AudioAsset::new("Réunion.M4A", "application/octet-stream", vec![1]).unwrap();
        assert_eq!(asset.extension().as_deref(), Some("m4a"));
    }

    #[test]
    fn rejects_non_audio() {
        let err = AudioAsset::new("notes.pdf", "application/pdf", vec![1]).unwrap_err();
        assert_eq!(err.name, "notes.pdf");
        assert!(AudioAsset::new("clip", "video/quicktime", vec![1]).is_err());
    }

    #[test]
    fn infers_media_type_from_name() {
        let asset = AudioAsset::from_named_bytes("standup.mp3", vec![0; 10]).unwrap();
        assert_eq!(asset.media_type(), "audio/mpeg");
        assert!(AudioAsset::from_named_bytes("standup.txt", vec![0; 10]).is_err());
    }

    #[test]
    fn human_readable_size_mb() {
        let asset = AudioAsset::new("a.mp3", "audio/mpeg", vec![0u8; 2 * 1024 * 1024]).unwrap();
        assert_eq!(asset.human_readable_size(), "2.00 MB");
        assert_eq!(asset.size_bytes(), 2 * BYTES_PER_MB);
    }

    #[test]
    fn empty_file_is_accepted_but_flagged() {
        let asset = AudioAsset::from_named_bytes("vide.wav", Vec::new()).unwrap();
        assert!(asset.is_empty());
        assert!(!AudioAsset::new("a.wav", "audio/wav", vec![1]).unwrap().is_empty());
    }

    #[test]
    fn to_base64() {
        let asset = AudioAsset::new("a.wav", "audio/wav", vec![1, 2, 3, 4]).unwrap();
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(asset.to_base64())
            .unwrap();
        assert_eq!(decoded, vec![1, 2, 3, 4]);
    }
}
