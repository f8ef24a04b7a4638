//! Reply source value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which path produced the reply body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Generated by an LLM provider
    Llm,
    /// Rendered from the built-in templates
    Template,
}

impl ReplySource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
