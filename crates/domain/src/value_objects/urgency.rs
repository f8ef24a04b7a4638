//! Urgency label value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Urgency level assigned to an incoming email
///
/// The three labels mirror the candidate labels sent to the
/// classification pipeline, so serde round-trips use the
/// capitalized form the classifier returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Urgency {
    /// Needs a response as soon as possible
    Urgent,
    /// Regular correspondence
    #[default]
    Normal,
    /// Informational, no action expected
    Low,
}

impl Urgency {
    /// Get the classifier-facing label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }

    /// Get the badge shown next to the label in clients
    #[must_use]
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Urgent => "🔴",
            Self::Normal => "🟡",
            Self::Low => "🟢",
        }
    }

    /// Check if this urgency outranks another
    #[must_use]
    pub const fn is_higher_than(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Urgent, Self::Normal | Self::Low) | (Self::Normal, Self::Low)
        )
    }

    /// All urgency levels in descending order (most urgent first)
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Urgent, Self::Normal, Self::Low]
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Urgent => 2,
            Self::Normal => 1,
            Self::Low => 0,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Urgency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urgent" => Ok(Self::Urgent),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            other => Err(DomainError::InvalidUrgency(other.to_string())),
        }
    }
}

impl PartialOrd for Urgency {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Urgency {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}
