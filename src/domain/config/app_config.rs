//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default Gemini model for transcription
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "gemini-2.0-flash-lite";

/// Default OpenAI model for summaries
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub user_id: Option<String>,
    pub transcription_model: Option<String>,
    pub summary_model: Option<String>,
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            gemini_api_key: None,
            openai_api_key: None,
            user_id: None,
            transcription_model: Some(DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            summary_model: Some(DEFAULT_SUMMARY_MODEL.to_string()),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            supabase_url: other.supabase_url.or(self.supabase_url),
            supabase_key: other.supabase_key.or(self.supabase_key),
            gemini_api_key: other.gemini_api_key.or(self.gemini_api_key),
            openai_api_key: other.openai_api_key.or(self.openai_api_key),
            user_id: other.user_id.or(self.user_id),
            transcription_model: other.transcription_model.or(self.transcription_model),
            summary_model: other.summary_model.or(self.summary_model),
            notify: other.notify.or(self.notify),
        }
    }

    /// Get the transcription model, or the default if not set
    pub fn transcription_model_or_default(&self) -> &str {
        self.transcription_model
            .as_deref()
            .unwrap_or(DEFAULT_TRANSCRIPTION_MODEL)
    }

    /// Get the summary model, or the default if not set
    pub fn summary_model_or_default(&self) -> &str {
        self.summary_model.as_deref().unwrap_or(DEFAULT_SUMMARY_MODEL)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}
