//! Summary domain module

mod meeting_summary;
mod prompt;

pub use meeting_summary::{
    is_insufficient_summary, is_no_data_transcript, Summary, MIN_SUMMARY_CHARS,
    MIN_TRANSCRIPT_CHARS, MISSING_SUMMARY, MISSING_TITLE, NO_DATA,
};
pub use prompt::SummaryPrompt;
