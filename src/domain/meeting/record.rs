//! Meeting record entity

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a persisted meeting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(String);

impl MeetingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A meeting as stored in the `meetings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: MeetingId,
    pub user_id: String,
    pub title: String,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration: i64,
    pub notes: Option<String>,
}

impl MeetingRecord {
    /// Whether transcription and summarization have not both landed yet
    pub fn is_provisional(&self) -> bool {
        self.transcript.is_none() || self.summary.is_none()
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &MeetingUpdate) {
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(ref transcript) = update.transcript {
            self.transcript = Some(transcript.clone());
        }
        if let Some(ref summary) = update.summary {
            self.summary = Some(summary.clone());
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
    }
}

/// Insert payload for a provisional meeting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeeting {
    pub user_id: String,
    pub title: String,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration: i64,
    pub notes: Option<String>,
    pub suggestions: Vec<String>,
    pub audio_url: Option<String>,
}

impl NewMeeting {
    /// Placeholder row created before transcription starts
    pub fn provisional(
        user_id: impl Into<String>,
        title: impl Into<String>,
        duration: i64,
        notes: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            transcript: None,
            summary: None,
            duration,
            notes: notes.filter(|n| !n.trim().is_empty()),
            suggestions: Vec::new(),
            audio_url: None,
        }
    }
}

/// Partial update of a meeting; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Default title for an upload made on `date` ("Upload du 19/10/2026")
pub fn provisional_title(date: NaiveDate) -> String {
    format!("Upload du {}", date.format("%d/%m/%Y"))
}

/// Pick the final title: user-supplied, then AI-suggested, then provisional
pub fn final_title(user: Option<&str>, suggested: &str, provisional: &str) -> String {
    user.map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| Some(suggested.trim()).filter(|t| !t.is_empty()))
        .unwrap_or(provisional)
        .to_string()
}
