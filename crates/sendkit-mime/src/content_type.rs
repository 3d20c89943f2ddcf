//! Content-Type values for generated parts.

use std::collections::BTreeMap;
use std::fmt;

/// A `Content-Type` header value: type, subtype, and parameters.
///
/// Parameters stay sorted by name so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Top-level type (`text`, `multipart`, `application`).
    pub main_type: String,
    /// Subtype (`plain`, `html`, `mixed`, `octet-stream`).
    pub sub_type: String,
    /// Parameters such as `charset` or `boundary`.
    pub parameters: BTreeMap<String, String>,
}

impl ContentType {
    /// Builds a bare type/subtype pair with no parameters.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// `text/plain` in UTF-8.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain").with_parameter("charset", "utf-8")
    }

    /// `text/html` in UTF-8.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "utf-8")
    }

    /// `multipart/mixed` delimited by `boundary`.
    #[must_use]
    pub fn multipart_mixed(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "mixed").with_parameter("boundary", boundary)
    }

    /// `application/octet-stream`, used for binary attachment parts.
    #[must_use]
    pub fn octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    /// Adds one parameter, replacing a previous value of the same name.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.sub_type)?;
        for (name, value) in &self.parameters {
            if value.contains(needs_quoting) {
                write!(f, "; {name}=\"{value}\"")?;
            } else {
                write!(f, "; {name}={value}")?;
            }
        }
        Ok(())
    }
}

/// Characters that force a parameter value into quotes (RFC 2045 tspecials
/// plus whitespace).
fn needs_quoting(c: char) -> bool {
    c.is_whitespace() || "()<>@,;:\\\"/[]?=".contains(c)
}
