//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod meeting;
pub mod settings;
pub mod subscription;
pub mod summary;
pub mod transcription;

// Re-export common types
pub use audio::{AudioAsset, DurationEstimate, DurationSource};
pub use config::AppConfig;
pub use error::*;
pub use meeting::{MeetingId, MeetingRecord, TaskId, TaskStatus, UploadTask};
pub use settings::UserSettings;
pub use subscription::{PlanType, QuotaCheck, QuotaError, SubscriptionSnapshot};
pub use summary::{Summary, SummaryPrompt};
pub use transcription::{SystemPrompt, Transcript};
