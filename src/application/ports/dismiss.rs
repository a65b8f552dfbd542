//! Dismiss-flag port interface

use async_trait::async_trait;

use crate::domain::error::ConfigError;

/// Key-value flags the UI layer persists locally (e.g. a dismissed banner)
#[async_trait]
pub trait DismissStore: Send + Sync {
    /// Whether the flag is set; unreadable storage counts as not dismissed
    async fn is_dismissed(&self, key: &str) -> bool;

    /// Set the flag
    async fn dismiss(&self, key: &str) -> Result<(), ConfigError>;
}
