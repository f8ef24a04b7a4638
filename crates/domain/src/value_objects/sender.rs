//! Sender value object with display-name and address parsing
//!
//! Accepts the forms seen in mail headers and add-on payloads:
//!
//! ```
//! use domain::Sender;
//!
//! let sender = Sender::new("Ada Lovelace <ada@example.com>").unwrap();
//! assert_eq!(sender.display_name(), Some("Ada Lovelace"));
//! assert_eq!(sender.address(), Some("ada@example.com"));
//!
//! // A bare address still yields a usable greeting name
//! let sender = Sender::new("ada@example.com").unwrap();
//! assert_eq!(sender.greeting_name(), Some("ada".to_string()));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::errors::DomainError;

/// Parsed sender of an incoming email
///
/// Holds the raw header value plus the display name and address when
/// they could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sender {
    raw: String,
    display_name: Option<String>,
    address: Option<String>,
}

impl Sender {
    /// Parse a sender header value
    ///
    /// Recognized forms: `Name <addr@host>`, a bare address, or a bare
    /// display name. Addresses are normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into().trim().to_string();
        if raw.is_empty() {
            return Err(DomainError::InvalidSender(raw));
        }

        if let Some((name_part, rest)) = raw.split_once('<') {
            let candidate = rest.trim_end_matches('>').trim().to_lowercase();
            let address = candidate.validate_email().then_some(candidate);
            let name = name_part.trim().trim_matches('"').to_string();
            let display_name = (!name.is_empty()).then_some(name);
            return Ok(Self {
                raw,
                display_name,
                address,
            });
        }

        let lowered = raw.to_lowercase();
        if lowered.validate_email() {
            return Ok(Self {
                raw: raw.clone(),
                display_name: None,
                address: Some(lowered),
            });
        }

        Ok(Self {
            display_name: Some(raw.clone()),
            raw,
            address: None,
        })
    }

    /// The sender exactly as it appeared in the message
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Display name, when one was present
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Email address, when one could be extracted
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Name to use in the reply greeting
    ///
    /// Prefers the display name, falls back to the local part of the
    /// address. `None` means the greeting should stay generic.
    pub fn greeting_name(&self) -> Option<String> {
        if let Some(name) = &self.display_name {
            return Some(name.clone());
        }
        self.address
            .as_deref()
            .and_then(|addr| addr.split('@').next())
            .filter(|local| !local.is_empty())
            .map(ToString::to_string)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TryFrom<String> for Sender {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Sender {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_address_form_is_parsed() {
        let sender = Sender::new("Ada Lovelace <Ada@Example.COM>").unwrap();
        assert_eq!(sender.display_name(), Some("Ada Lovelace"));
        assert_eq!(sender.address(), Some("ada@example.com"));
    }

    #[test]
    fn quoted_display_name_is_unquoted() {
        let sender = Sender::new("\"Lovelace, Ada\" <ada@example.com>").unwrap();
        assert_eq!(sender.display_name(), Some("Lovelace, Ada"));
    }

    #[test]
    fn bare_address_has_no_display_name() {
        let sender = Sender::new("ada@example.com").unwrap();
        assert_eq!(sender.display_name(), None);
        assert_eq!(sender.address(), Some("ada@example.com"));
    }

    #[test]
    fn bare_name_has_no_address() {
        let sender = Sender::new("Ada Lovelace").unwrap();
        assert_eq!(sender.display_name(), Some("Ada Lovelace"));
        assert_eq!(sender.address(), None);
    }

    #[test]
    fn blank_sender_is_rejected() {
        assert!(Sender::new("").is_err());
        assert!(Sender::new("   ").is_err());
    }

    #[test]
    fn greeting_prefers_display_name() {
        let sender = Sender::new("Ada <ada@example.com>").unwrap();
        assert_eq!(sender.greeting_name(), Some("Ada".to_string()));
    }

    #[test]
    fn greeting_falls_back_to_local_part() {
        let sender = Sender::new("ada.lovelace@example.com").unwrap();
        assert_eq!(sender.greeting_name(), Some("ada.lovelace".to_string()));
    }

    #[test]
    fn invalid_address_in_brackets_is_kept_as_name_only() {
        let sender = Sender::new("Ada <not-an-address>").unwrap();
        assert_eq!(sender.display_name(), Some("Ada"));
        assert_eq!(sender.address(), None);
    }

    #[test]
    fn raw_value_is_preserved() {
        let sender = Sender::new("Ada Lovelace <ada@example.com>").unwrap();
        assert_eq!(sender.as_str(), "Ada Lovelace <ada@example.com>");
        assert_eq!(sender.to_string(), "Ada Lovelace <ada@example.com>");
    }

    #[test]
    fn try_from_str() {
        let sender: Sender = "ada@example.com".try_into().unwrap();
        assert_eq!(sender.address(), Some("ada@example.com"));
    }

    #[test]
    fn serialization_roundtrip() {
        let sender = Sender::new("Ada <ada@example.com>").unwrap();
        let json = serde_json::to_string(&sender).unwrap();
        let parsed: Sender = serde_json::from_str(&json).unwrap();
        assert_eq!(sender, parsed);
    }
}
