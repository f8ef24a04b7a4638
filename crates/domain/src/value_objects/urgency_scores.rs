//! Per-label classification scores

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::Urgency};

/// Confidence scores for each urgency label, in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyScores {
    urgent: f64,
    normal: f64,
    low: f64,
}

impl UrgencyScores {
    /// Create a score set, validating every score is in range
    ///
    /// # Errors
    ///
    /// Returns an error if any score is outside `0.0..=1.0` or not finite.
    pub fn new(urgent: f64, normal: f64, low: f64) -> Result<Self, DomainError> {
        for (label, value) in [("urgent", urgent), ("normal", normal), ("low", low)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DomainError::invalid_score(label, value));
            }
        }
        Ok(Self { urgent, normal, low })
    }

    /// Get the score for a single label
    #[must_use]
    pub const fn get(&self, urgency: Urgency) -> f64 {
        match urgency {
            Urgency::Urgent => self.urgent,
            Urgency::Normal => self.normal,
            Urgency::Low => self.low,
        }
    }

    /// The label with the highest score
    ///
    /// Ties resolve toward the more urgent label, which is the safer
    /// direction for triage.
    #[must_use]
    pub fn top(&self) -> Urgency {
        let mut best = Urgency::Urgent;
        for candidate in [Urgency::Normal, Urgency::Low] {
            if self.get(candidate) > self.get(best) {
                best = candidate;
            }
        }
        best
    }

    /// Rescale so the scores sum to 1.0
    ///
    /// Raw pipeline output does not always arrive normalized. A zero
    /// sum cannot be rescaled and is returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let sum = self.urgent + self.normal + self.low;
        if sum <= f64::EPSILON {
            return *self;
        }
        Self {
            urgent: self.urgent / sum,
            normal: self.normal / sum,
            low: self.low / sum,
        }
    }

    /// True when every score is zero
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urgent <= f64::EPSILON && self.normal <= f64::EPSILON && self.low <= f64::EPSILON
    }

    pub const fn urgent(&self) -> f64 {
        self.urgent
    }

    pub const fn normal(&self) -> f64 {
        self.normal
    }

    pub const fn low(&self) -> f64 {
        self.low
    }
}
