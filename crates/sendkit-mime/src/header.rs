//! Header collection for generated messages.

use std::collections::BTreeMap;
use std::fmt;

/// Message or part headers, keyed case-insensitively.
///
/// Names are stored lowercase and re-capitalized on output; the map keeps
/// them sorted so generated output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    map: BTreeMap<String, String>,
}

impl Headers {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.map.insert(name.into().to_lowercase(), value.into());
    }

    /// Looks a header up by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_lowercase()).map(String::as_str)
    }

    /// True when nothing has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Appends every header to `out` in wire format (CRLF line endings).
    pub fn write_wire(&self, out: &mut String) {
        for (name, value) in &self.map {
            out.push_str(&canonical_name(name));
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.map {
            writeln!(f, "{}: {value}", canonical_name(name))?;
        }
        Ok(())
    }
}

/// Restores conventional capitalization, `content-type` -> `Content-Type`.
fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split('-').enumerate() {
        if i > 0 {
            out.push('-');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
