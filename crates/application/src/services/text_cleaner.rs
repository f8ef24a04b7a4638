//! Email text preparation
//!
//! Strips quoted replies, forwarded blocks, and boilerplate footers
//! before classification. Uses rule-based pattern matching with the
//! Aho-Corasick algorithm for efficient multi-pattern detection.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use domain::EmailMessage;

/// Longest input passed to the classifier, in characters
const MAX_CLASSIFIER_CHARS: usize = 4000;

/// Markers that start content with no classification value
///
/// Everything from the first occurrence onward is dropped.
const CUTOFF_MARKERS: &[&str] = &[
    "-----original message-----",
    "begin forwarded message",
    "________________________________",
    "sent from my ",
    "this email and any attachments",
    "the information contained in this email",
    "confidentiality notice",
];

static MARKERS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(CUTOFF_MARKERS)
        .expect("Failed to build marker matcher")
});

/// Prepares raw email text for classification and summarization
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl TextCleaner {
    /// Create a new cleaner
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Strip quoted replies and boilerplate from an email body
    ///
    /// Drops everything from the first cutoff marker, removes `>`
    /// quoted lines, stops at an `On ... wrote:` attribution line,
    /// and collapses runs of blank lines.
    #[must_use]
    pub fn clean(&self, body: &str) -> String {
        let cut = MARKERS.find(body).map_or(body.len(), |m| m.start());
        let head = &body[..cut];

        let mut cleaned = String::with_capacity(head.len());
        let mut blank_run = 0_usize;
        for line in head.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('>') {
                continue;
            }
            if trimmed.starts_with("On ") && trimmed.ends_with("wrote:") {
                break;
            }
            if trimmed.is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            cleaned.push_str(line);
            cleaned.push('\n');
        }

        cleaned.trim().to_string()
    }

    /// Build the classifier input from subject and cleaned body
    ///
    /// An email whose body is entirely quoted text falls back to the
    /// raw body rather than classifying nothing.
    #[must_use]
    pub fn classifier_input(&self, email: &EmailMessage) -> String {
        let subject = email.subject.trim();
        let mut body = self.clean(&email.body);
        if body.is_empty() {
            body = email.body.trim().to_string();
        }

        let combined = match (subject.is_empty(), body.is_empty()) {
            (true, _) => body,
            (false, true) => format!("Subject: {subject}"),
            (false, false) => format!("Subject: {subject}\n\n{body}"),
        };

        truncate_chars(&combined, MAX_CLASSIFIER_CHARS)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
