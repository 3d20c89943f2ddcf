//! Address validation scopes and the per-scope validator registry.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Validation scope for an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The authenticated sender.
    Author,
    /// Direct recipients.
    To,
    /// Carbon-copy recipients.
    Cc,
    /// Blind-carbon-copy recipients.
    Bcc,
}

impl Scope {
    pub(crate) const ALL: [Self; 4] = [Self::Author, Self::To, Self::Cc, Self::Bcc];

    /// Returns the scope name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address validation predicate.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Per-scope registry of validation predicates.
///
/// Every scope starts out with [`default_validator`]; scopes can be
/// re-pointed individually or all at once.
#[derive(Clone)]
pub struct ValidatorSet {
    author: Validator,
    to: Validator,
    cc: Validator,
    bcc: Validator,
}

impl Default for ValidatorSet {
    fn default() -> Self {
        let validator: Validator = Arc::new(default_validator);
        Self {
            author: Arc::clone(&validator),
            to: Arc::clone(&validator),
            cc: Arc::clone(&validator),
            bcc: validator,
        }
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatorSet { .. }")
    }
}

impl ValidatorSet {
    /// Returns the validator registered for a scope.
    #[must_use]
    pub fn get(&self, scope: Scope) -> &Validator {
        match scope {
            Scope::Author => &self.author,
            Scope::To => &self.to,
            Scope::Cc => &self.cc,
            Scope::Bcc => &self.bcc,
        }
    }

    fn slot(&mut self, scope: Scope) -> &mut Validator {
        match scope {
            Scope::Author => &mut self.author,
            Scope::To => &mut self.to,
            Scope::Cc => &mut self.cc,
            Scope::Bcc => &mut self.bcc,
        }
    }

    /// Replaces the validator for the named scopes.
    ///
    /// Scope names are drawn from `all`, `author`, `to`, `cc` and `bcc`;
    /// `all` replaces every scope. Names are checked before anything is
    /// assigned, so an unknown name leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unrecognized scope name.
    pub fn set<S: AsRef<str>>(&mut self, validator: Validator, scopes: &[S]) -> Result<()> {
        let mut selected = Vec::with_capacity(scopes.len());
        let mut all = false;

        for name in scopes {
            match name.as_ref() {
                "all" => all = true,
                "author" => selected.push(Scope::Author),
                "to" => selected.push(Scope::To),
                "cc" => selected.push(Scope::Cc),
                "bcc" => selected.push(Scope::Bcc),
                other => {
                    return Err(Error::Configuration(format!(
                        "unknown validator scope '{other}'"
                    )));
                }
            }
        }

        if all {
            selected = Scope::ALL.to_vec();
        }

        for scope in selected {
            *self.slot(scope) = Arc::clone(&validator);
        }

        Ok(())
    }
}

/// Default address check.
///
/// Accepts `local@domain` where the local part uses word characters, digits
/// and `-_+.`, the first domain label uses word characters, digits and
/// `-_+`, and one or more dot-separated word-character segments follow
/// (so `test@example.edu.ua` passes and `test@ohmygod......what` does not).
///
/// Purely syntactic; no DNS or mailbox verification of any kind.
#[must_use]
pub fn default_validator(address: &str) -> bool {
    let mut halves = address.split('@');
    let (Some(local), Some(domain), None) = (halves.next(), halves.next(), halves.next()) else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
    {
        return false;
    }

    let mut labels = domain.split('.');
    let Some(first) = labels.next() else {
        return false;
    };
    if first.is_empty()
        || !first
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '+'))
    {
        return false;
    }

    let mut segments = 0_usize;
    for segment in labels {
        if segment.is_empty() || !segment.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return false;
        }
        segments += 1;
    }

    segments > 0
}
