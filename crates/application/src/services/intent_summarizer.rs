//! One-line intent extraction
//!
//! Extractive summarizer: the first sentence of the cleaned body,
//! capped at thirty words. No model round-trip involved.

/// Word cap for the intent line
const MAX_SUMMARY_WORDS: usize = 30;

/// Summarizes what the sender wants in a single line
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentSummarizer;

impl IntentSummarizer {
    /// Create a new summarizer
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Produce the intent line for an email
    ///
    /// Falls back to the subject when the cleaned body is blank.
    #[must_use]
    pub fn summarize(&self, subject: &str, cleaned_body: &str) -> String {
        let body = cleaned_body.trim();
        let text = if body.is_empty() { subject.trim() } else { body };
        if text.is_empty() {
            return "No content".to_string();
        }
        cap_words(first_sentence(text), MAX_SUMMARY_WORDS)
    }
}

fn first_sentence(text: &str) -> &str {
    for (idx, ch) in text.char_indices() {
        match ch {
            '.' | '!' | '?' => return &text[..=idx],
            '\n' => return &text[..idx],
            _ => {},
        }
    }
    text
}

fn cap_words(text: &str, max: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max {
        words.join(" ")
    } else {
        format!("{}...", words[..max].join(" "))
    }
}
