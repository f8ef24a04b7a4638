//! Application services

pub mod intent_summarizer;
pub mod text_cleaner;
pub mod triage_service;

pub use intent_summarizer::IntentSummarizer;
pub use text_cleaner::TextCleaner;
pub use triage_service::{ReadinessReport, TriageService};
