//! Upload task entity
//!
//! A task tracks one upload from start to a terminal state and is read by
//! the notification surface.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::MeetingId;

/// Task kind written for audio uploads
pub const UPLOAD_TASK_KIND: &str = "upload_transcription";

/// Identifier of a persisted task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Processing,
    Completed,
    Error,
}

impl TaskStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Completed and error are final
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as stored in the task table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub id: TaskId,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: TaskStatus,
    pub progress: String,
    #[serde(default)]
    pub progress_percent: u8,
    pub meeting_id: Option<MeetingId>,
    pub error: Option<String>,
}

impl UploadTask {
    /// Apply a partial update in place
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(ref progress) = update.progress {
            self.progress = progress.clone();
        }
        if let Some(percent) = update.progress_percent {
            self.progress_percent = percent.min(100);
        }
        if let Some(ref meeting_id) = update.meeting_id {
            self.meeting_id = Some(meeting_id.clone());
        }
        if let Some(ref error) = update.error {
            self.error = Some(error.clone());
        }
    }

    /// The meeting a notification may link to; only set once the task completed
    pub fn ready_meeting(&self) -> Option<&MeetingId> {
        match self.status {
            TaskStatus::Completed => self.meeting_id.as_ref(),
            _ => None,
        }
    }
}

/// Insert payload for a new task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: TaskStatus,
    pub progress: String,
    pub progress_percent: u8,
}

impl NewTask {
    /// A processing upload task with its initial message
    pub fn upload(user_id: impl Into<String>, progress: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: UPLOAD_TASK_KIND.to_string(),
            status: TaskStatus::Processing,
            progress: progress.into(),
            progress_percent: 0,
        }
    }
}

/// Partial task update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<MeetingId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskUpdate {
    /// Progress message and percentage for a running stage
    pub fn progress(message: impl Into<String>, percent: u8) -> Self {
        Self {
            progress: Some(message.into()),
            progress_percent: Some(percent),
            ..Default::default()
        }
    }

    /// Link the task to its meeting
    pub fn with_meeting(mut self, meeting_id: &MeetingId) -> Self {
        self.meeting_id = Some(meeting_id.clone());
        self
    }

    /// Terminal success
    pub fn completed(message: impl Into<String>, meeting_id: &MeetingId) -> Self {
        Self {
            status: Some(TaskStatus::Completed),
            progress: Some(message.into()),
            progress_percent: Some(100),
            meeting_id: Some(meeting_id.clone()),
            error: None,
        }
    }

    /// Terminal failure
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: Some(TaskStatus::Error),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> UploadTask {
        UploadTask {
            id: TaskId::new("t1"),
            user_id: "u1".to_string(),
            kind: UPLOAD_TASK_KIND.to_string(),
            status: TaskStatus::Processing,
            progress: "Démarrage".to_string(),
            progress_percent: 0,
            meeting_id: None,
            error: None,
        }
    }

    #[test]
    fn meeting_is_hidden_until_completed() {
        let mut t = task();
        t.apply(&TaskUpdate::progress("Envoi", 20).with_meeting(&MeetingId::new("m1")));
        assert_eq!(t.meeting_id, Some(MeetingId::new("m1")));
        assert!(t.ready_meeting().is_none());

        t.apply(&TaskUpdate::completed("Terminé", &MeetingId::new("m1")));
        assert_eq!(t.ready_meeting(), Some(&MeetingId::new("m1")));
        assert_eq!(t.progress_percent, 100);
        assert!(t.status.is_terminal());
    }

    #[test]
    fn failed_update_keeps_progress() {
        let mut t = task();
        t.apply(&TaskUpdate::progress("Résumé", 80));
        t.apply(&TaskUpdate::failed("boom"));
        assert_eq!(t.status, TaskStatus::Error);
        assert_eq!(t.error.as_deref(), Some("boom"));
        assert_eq!(t.progress_percent, 80);
    }

    #[test]
    fn new_task_serializes_type_field() {
        let json = serde_json::to_value(NewTask::upload("u1", "Démarrage")).unwrap();
        assert_eq!(json["type"], UPLOAD_TASK_KIND);
        assert_eq!(json["status"], "processing");
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let json = serde_json::to_value(TaskUpdate::failed("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "error": "boom"}));
    }
}
