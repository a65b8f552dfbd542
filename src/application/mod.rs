//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod probe;
pub mod setup;
pub mod upload;

// Re-export use cases
pub use probe::{DurationProbe, METADATA_TIMEOUT};
pub use setup::{dismiss_key, SetupReminder};
pub use upload::{
    ProgressCallback, UploadError, UploadFields, UploadOrchestrator, UploadOutcome,
    UploadProgress,
};
