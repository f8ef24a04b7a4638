//! Drafted reply entity

use serde::{Deserialize, Serialize};

use crate::value_objects::ReplySource;

/// Subject used when the original message had none
pub const FALLBACK_REPLY_SUBJECT: &str = "Re: your message";

/// A fully assembled reply: subject, enveloped body, and provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyDraft {
    /// Reply subject line
    pub subject: String,
    /// Complete reply text including greeting and signature
    pub body: String,
    /// Which path produced the body
    pub source: ReplySource,
}

impl ReplyDraft {
    /// Create a reply draft
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        source: ReplySource,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            source,
        }
    }

    /// Derive the reply subject from the original subject
    ///
    /// Prefixes `Re: ` unless the original already starts with it
    /// (case-insensitively). A blank original subject falls back to
    /// [`FALLBACK_REPLY_SUBJECT`].
    #[must_use]
    pub fn subject_for(original: &str) -> String {
        let trimmed = original.trim();
        if trimmed.is_empty() {
            return FALLBACK_REPLY_SUBJECT.to_string();
        }
        if trimmed.to_lowercase().starts_with("re:") {
            return trimmed.to_string();
        }
        format!("Re: {trimmed}")
    }
}
