//! Domain error types

use thiserror::Error;

/// Error when the selected file is not audio
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Veuillez sélectionner un fichier audio valide (MP3, WAV, M4A, WebM, etc.) : \"{name}\" ({media_type})")]
pub struct InvalidFileTypeError {
    pub name: String,
    pub media_type: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),

    #[error("Missing setting '{key}'. Set {env} or run 'meeting-scribe config set {key} <value>'")]
    Missing { key: &'static str, env: &'static str },
}
