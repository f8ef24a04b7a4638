//! Triage pipeline output entity

use serde::{Deserialize, Serialize};

use crate::{
    entities::ReplyDraft,
    value_objects::{Urgency, UrgencyScores},
};

/// Everything the pipeline produces for one email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    /// Winning urgency label
    pub urgency: Urgency,
    /// Per-label confidence scores
    pub scores: UrgencyScores,
    /// One-line summary of what the sender wants
    pub intent: String,
    /// The assembled reply draft
    pub reply: ReplyDraft,
}

impl TriageResult {
    pub fn new(
        scores: UrgencyScores,
        intent: impl Into<String>,
        reply: ReplyDraft,
    ) -> Self {
        Self {
            urgency: scores.top(),
            scores,
            intent: intent.into(),
            reply,
        }
    }
}
