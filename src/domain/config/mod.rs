//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_SUMMARY_MODEL, DEFAULT_TRANSCRIPTION_MODEL};
