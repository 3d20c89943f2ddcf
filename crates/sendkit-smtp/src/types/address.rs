//! Envelope address type.

use crate::error::{Error, Result};

/// An address used in the SMTP envelope (`MAIL FROM` / `RCPT TO`).
///
/// Validation is shallow on purpose: one `@`, a non-empty part on each
/// side, and nothing a server would read as line or parameter structure.
/// Mailbox-level policy belongs to the composing layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Wraps an address string after checking its envelope shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] when the shape is unusable.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();

        let Some((local, domain)) = addr.split_once('@') else {
            return Err(Error::InvalidAddress(format!(
                "{addr:?} is missing the @ separator"
            )));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "{addr:?} has an empty local part or domain"
            )));
        }
        if domain.contains('@') {
            return Err(Error::InvalidAddress(format!(
                "{addr:?} contains more than one @"
            )));
        }
        if addr
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>'))
        {
            return Err(Error::InvalidAddress(format!(
                "{addr:?} contains whitespace, control, or angle-bracket characters"
            )));
        }

        Ok(Self(addr))
    }

    /// Returns the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_mailbox() {
        let addr = Address::new("user@example.com").unwrap();
        assert_eq!(addr.as_str(), "user@example.com");
        assert_eq!(addr.to_string(), "user@example.com");
    }

    #[test]
    fn test_rejects_unusable_shapes() {
        for bad in [
            "",
            "userexample.com",
            "user@foo@example.com",
            "@example.com",
            "user@",
            "us er@example.com",
            "user@example.com\r\n",
            "<user@example.com>",
        ] {
            assert!(Address::new(bad).is_err(), "accepted {bad:?}");
        }
    }
}
