//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod confirm;
pub mod dismiss;
pub mod media;
pub mod notifier;
pub mod store;
pub mod summarizer;
pub mod transcriber;

// Re-export common types
pub use config::ConfigStore;
pub use confirm::{AlwaysConfirm, UploadConfirmer};
pub use dismiss::DismissStore;
pub use media::{FullDecoder, MediaError, MetadataReader};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use store::{MeetingStore, SettingsStore, StoreError, SubscriptionStore, TaskStore};
pub use summarizer::{SummarizationError, Summarizer};
pub use transcriber::{Transcriber, TranscriptionError, TranscriptionProgress};
