//! Maintainer contact details.

use serde::Serialize;

/// One parsed mailbox from an address-bearing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// The bare email address
    address: String,

    /// Display name, if the source used the `Name <addr>` form
    display: Option<String>,
}

impl Contact {
    /// Create a contact.
    pub fn new(address: impl Into<String>, display: Option<String>) -> Self {
        Contact {
            address: address.into(),
            display,
        }
    }

    /// Get the email address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the display name, if any.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }
}
