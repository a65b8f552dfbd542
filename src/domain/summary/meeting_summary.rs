//! Meeting summary value object

use serde::{Deserialize, Serialize};

/// Title and summary returned when there is nothing to summarize
pub const NO_DATA: &str = "Pas de données";

/// Transcripts shorter than this (after trimming) are not sent to the model
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

/// Summaries shorter than this are treated as the model giving up
pub const MIN_SUMMARY_CHARS: usize = 100;

/// Fallback when the model omits the summary field
pub const MISSING_SUMMARY: &str = "Aucun résumé généré";

/// Fallback when the model omits the title field
pub const MISSING_TITLE: &str = "Sans titre";

/// Phrases the model uses when it finds nothing relevant
const INSUFFICIENT_CONTENT_MARKERS: &[&str] = &[
    "transcription ne contient pas de contenu pertinent",
    "transcription semble être incomplète",
    "ne permettant pas de générer",
];

/// AI-generated meeting title and markdown summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub summary: String,
}

impl Summary {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// The "nothing to summarize" sentinel
    pub fn no_data() -> Self {
        Self::new(NO_DATA, NO_DATA)
    }

    /// Whether this is the sentinel
    pub fn is_no_data(&self) -> bool {
        self.title == NO_DATA && self.summary == NO_DATA
    }

    /// Normalize raw model fields: fill missing values, then replace
    /// content-free answers with the sentinel.
    pub fn from_model(title: Option<String>, summary: Option<String>) -> Self {
        let summary = summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| MISSING_SUMMARY.to_string());
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| MISSING_TITLE.to_string());

        if is_insufficient_summary(&summary) {
            return Self::no_data();
        }

        Self { title, summary }
    }
}

/// Whether a transcript carries too little to be worth a model call
pub fn is_no_data_transcript(transcript: &str) -> bool {
    transcript.contains(NO_DATA) || transcript.trim().chars().count() < MIN_TRANSCRIPT_CHARS
}

/// Whether a generated summary signals that the model found nothing to say
pub fn is_insufficient_summary(summary: &str) -> bool {
    summary.chars().count() < MIN_SUMMARY_CHARS
        || INSUFFICIENT_CONTENT_MARKERS
            .iter()
            .any(|marker| summary.contains(marker))
}
