//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, interactive prompts,
//! and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod confirm;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_probe, run_setup, run_upload, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, UploadArgs, UploadOptions};
pub use presenter::Presenter;
