//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like Supabase, Gemini, OpenAI, etc.

pub mod config;
pub mod media;
pub mod notification;
pub mod persistence;
pub mod summarization;
pub mod transcription;

// Re-export adapters
pub use config::{TomlFlagStore, XdgConfigStore};
pub use media::{SymphoniaDecoder, SymphoniaMetadataReader};
pub use notification::{create_notifier, NotifySendNotifier};
pub use persistence::SupabaseClient;
pub use summarization::OpenAiSummarizer;
pub use transcription::GeminiTranscriber;
