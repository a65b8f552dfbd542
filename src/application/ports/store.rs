//! Persistence port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::meeting::{
    MeetingId, MeetingRecord, MeetingUpdate, NewMeeting, NewTask, TaskId, TaskUpdate, UploadTask,
};
use crate::domain::settings::UserSettings;
use crate::domain::subscription::SubscriptionSnapshot;

/// Persistence errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database request failed: {0}")]
    RequestFailed(String),

    #[error("Database error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse database response: {0}")]
    ParseError(String),

    #[error("No row returned for {0}")]
    NotFound(String),
}

/// Port for the `meetings` table
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Insert a meeting and return the stored row
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<MeetingRecord, StoreError>;

    /// Apply a partial update to a meeting
    async fn update_meeting(&self, id: &MeetingId, update: &MeetingUpdate)
        -> Result<(), StoreError>;

    /// Fetch a meeting by id
    async fn get_meeting(&self, id: &MeetingId) -> Result<Option<MeetingRecord>, StoreError>;
}

/// Port for the `user_subscriptions` table
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Fetch the user's subscription, if they have one
    async fn get_subscription(
        &self,
        user_id: &str,
    ) -> Result<Option<SubscriptionSnapshot>, StoreError>;
}

/// Port for the background task table read by the notification surface
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task and return its id
    async fn create_task(&self, task: &NewTask) -> Result<TaskId, StoreError>;

    /// Apply a partial update to a task
    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> Result<(), StoreError>;

    /// Fetch a task by id
    async fn get_task(&self, id: &TaskId) -> Result<Option<UploadTask>, StoreError>;
}

/// Port for the `user_settings` table
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch the user's settings row, if any
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>, StoreError>;
}
