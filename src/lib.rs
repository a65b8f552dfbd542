//! MeetingScribe - meeting recordings to transcripts and AI summaries
//!
//! This crate uploads a meeting recording, estimates its duration, gates it
//! against the user's monthly minute quota, and drives the transcription and
//! summarization pipeline, persisting the meeting in Supabase.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, entities, quota rules, and errors
//! - **Application**: Use cases (duration probe, upload orchestrator, setup reminder) and port traits
//! - **Infrastructure**: Adapter implementations (symphonia, Gemini, OpenAI, Supabase, XDG config, notify-send)
//! - **CLI**: Command-line interface, argument parsing, and presentation

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
