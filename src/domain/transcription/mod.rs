//! Transcription domain module

mod system_prompt;
mod transcript;

pub use system_prompt::SystemPrompt;
pub use transcript::Transcript;
