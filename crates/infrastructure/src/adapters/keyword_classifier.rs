//! Offline keyword classifier
//!
//! Rule-based stand-in for the hosted model. Scans the text for cue
//! phrases with Aho-Corasick and emits fixed score profiles, so triage
//! keeps working when the inference endpoint is down.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use application::ports::{ClassificationError, ClassifierPort};
use async_trait::async_trait;
use domain::UrgencyScores;
use tracing::{debug, instrument};

/// Phrases that signal a time-critical email
const URGENT_CUES: &[&str] = &[
    "urgent",
    "asap",
    "as soon as possible",
    "immediately",
    "right away",
    "emergency",
    "critical",
    "outage",
    "production is down",
    "deadline",
];

/// Phrases that signal informational or bulk email
const LOW_CUES: &[&str] = &[
    "newsletter",
    "unsubscribe",
    "no action needed",
    "no action required",
    "no rush",
    "fyi",
    "digest",
    "whenever you get a chance",
];

static URGENT_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(URGENT_CUES)
        .expect("Failed to build cue matcher")
});

static LOW_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(LOW_CUES)
        .expect("Failed to build cue matcher")
});

/// Keyword-based urgency classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Create a new keyword classifier
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn score_profile(urgent_hits: usize, low_hits: usize) -> (f64, f64, f64) {
        if urgent_hits == 0 && low_hits == 0 {
            (0.1, 0.8, 0.1)
        } else if urgent_hits > low_hits {
            (0.8, 0.15, 0.05)
        } else if low_hits > urgent_hits {
            (0.05, 0.25, 0.7)
        } else {
            // Mixed signals resolve toward urgent
            (0.4, 0.4, 0.2)
        }
    }
}

#[async_trait]
impl ClassifierPort for KeywordClassifier {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassificationError> {
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }

        let urgent_hits = URGENT_MATCHER.find_iter(text).count();
        let low_hits = LOW_MATCHER.find_iter(text).count();
        let (urgent, normal, low) = Self::score_profile(urgent_hits, low_hits);

        debug!(urgent_hits, low_hits, "Keyword classification");

        UrgencyScores::new(urgent, normal, low)
            .map_err(|e| ClassificationError::InvalidResponse(e.to_string()))
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use domain::Urgency;

    use super::*;

    #[tokio::test]
    async fn urgent_cues_win() {
        let classifier = KeywordClassifier::new();
        let scores = classifier
            .classify("URGENT: the production cluster is in an outage")
            .await
            .unwrap();
        assert_eq!(scores.top(), Urgency::Urgent);
    }

    #[tokio::test]
    async fn bulk_cues_score_low() {
        let classifier = KeywordClassifier::new();
        let scores = classifier
            .classify("Weekly newsletter. Click unsubscribe to opt out.")
            .await
            .unwrap();
        assert_eq!(scores.top(), Urgency::Low);
    }

    #[tokio::test]
    async fn plain_text_defaults_to_normal() {
        let classifier = KeywordClassifier::new();
        let scores = classifier
            .classify("Could you review the draft when you have a moment?")
            .await
            .unwrap();
        assert_eq!(scores.top(), Urgency::Normal);
    }

    #[tokio::test]
    async fn mixed_cues_resolve_toward_urgent() {
        let classifier = KeywordClassifier::new();
        let scores = classifier
            .classify("FYI, the deadline moved up.")
            .await
            .unwrap();
        assert_eq!(scores.top(), Urgency::Urgent);
    }

    #[tokio::test]
    async fn matching_is_case_insensitive() {
        let classifier = KeywordClassifier::new();
        let scores = classifier.classify("Need this Asap please").await.unwrap();
        assert_eq!(scores.top(), Urgency::Urgent);
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let classifier = KeywordClassifier::new();
        let err = classifier.classify("   ").await.unwrap_err();
        assert!(matches!(err, ClassificationError::EmptyInput));
    }

    #[tokio::test]
    async fn always_healthy() {
        let classifier = KeywordClassifier::new();
        assert!(classifier.is_healthy().await);
        assert_eq!(classifier.name(), "keyword");
    }
}
