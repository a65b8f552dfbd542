//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// MeetingScribe - meeting recordings to transcripts and AI summaries
#[derive(Parser, Debug)]
#[command(name = "meeting-scribe")]
#[command(version)]
#[command(about = "Upload meeting recordings for transcription and AI summaries")]
#[command(long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe and summarize a recording, storing it as a meeting
    Upload(UploadArgs),
    /// Print the detected duration of a recording
    Probe {
        /// Audio file
        file: PathBuf,
    },
    /// Check whether e-mail settings still need to be configured
    Setup {
        /// User id (overrides config and MEETING_SCRIBE_USER_ID)
        #[arg(short = 'u', long, value_name = "ID")]
        user: Option<String>,

        /// Stop showing the reminder for this user
        #[arg(long)]
        dismiss: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of the upload subcommand
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Audio file (mp3, wav, m4a, webm, ogg, flac, aac, wma)
    pub file: PathBuf,

    /// Meeting title; the AI suggests one when omitted
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Free-form notes stored with the meeting
    #[arg(long)]
    pub notes: Option<String>,

    /// Media type of the file, when the extension is not enough
    #[arg(long = "type", value_name = "MEDIA_TYPE")]
    pub media_type: Option<String>,

    /// User id (overrides config and MEETING_SCRIBE_USER_ID)
    #[arg(short = 'u', long, value_name = "ID")]
    pub user: Option<String>,

    /// Continue without asking when close to the monthly quota
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Show a desktop notification when done
    #[arg(short = 'n', long)]
    pub notify: bool,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed upload options after config merging
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub file: PathBuf,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub assume_yes: bool,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "supabase_url",
    "supabase_key",
    "gemini_api_key",
    "openai_api_key",
    "user_id",
    "transcription_model",
    "summary_model",
    "notify",
];

/// Keys whose values are masked when displayed
pub const SECRET_CONFIG_KEYS: &[&str] = &["supabase_key", "gemini_api_key", "openai_api_key"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
