//! Incoming email entity

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::Sender};

/// An email submitted for triage
///
/// Subject and body are free text. At least one of them must contain
/// non-whitespace content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Who sent the message, when known
    pub sender: Option<Sender>,
    /// Subject line, possibly empty
    pub subject: String,
    /// Plain-text body, possibly empty
    pub body: String,
}

impl EmailMessage {
    /// Create a message, rejecting one that is entirely blank
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyMessage`] when subject and body are
    /// both blank.
    pub fn new(
        sender: Option<Sender>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let subject = subject.into();
        let body = body.into();
        if subject.trim().is_empty() && body.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self {
            sender,
            subject,
            body,
        })
    }

    /// Name to greet the sender with, when one is known
    pub fn greeting_name(&self) -> Option<String> {
        self.sender.as_ref().and_then(Sender::greeting_name)
    }
}
