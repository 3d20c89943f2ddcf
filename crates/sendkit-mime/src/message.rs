//! Outgoing MIME message assembly.

use crate::content_type::ContentType;
use crate::encoding::{encode_base64_wrapped, encode_rfc2047};
use crate::error::{Error, Result};
use crate::header::Headers;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Transfer encoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII.
    SevenBit,
    /// 8-bit text.
    EightBit,
    /// Base64 encoding.
    Base64,
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

/// MIME message part with its body already in wire-ready text form.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Encoded part body.
    pub body: String,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub const fn new(headers: Headers, body: String) -> Self {
        Self { headers, body }
    }
}

/// Outgoing multipart MIME message.
///
/// Top-level headers plus an ordered list of parts, serialized with
/// [`Message::to_wire`] as a `multipart/mixed` container.
#[derive(Debug, Clone)]
pub struct Message {
    headers: Headers,
    parts: Vec<Part>,
    boundary: String,
}

impl Message {
    /// Creates an empty message with a fresh part boundary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: Headers::new(),
            parts: Vec::new(),
            boundary: next_boundary(),
        }
    }

    /// Sets a top-level header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the name is not a valid header
    /// token or the value contains CR/LF (header injection guard).
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        check_header(name, value)?;
        self.headers.set(name, value);
        Ok(())
    }

    /// Sets a top-level header from caller-supplied text, applying RFC 2047
    /// encoding when the value is not plain ASCII.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the name is invalid or the value
    /// contains CR/LF.
    pub fn set_text_header(&mut self, name: &str, value: &str) -> Result<()> {
        if value.contains('\r') || value.contains('\n') {
            return Err(Error::InvalidHeader(format!(
                "value for {name} contains a line break"
            )));
        }
        self.set_header(name, &encode_rfc2047(value))
    }

    /// Appends a text part with an explicit content type.
    ///
    /// Line endings in `content` are normalized to CRLF.
    pub fn attach_text(&mut self, content: &str, content_type: &ContentType) {
        let mut headers = Headers::new();
        headers.set("content-type", content_type.to_string());
        headers.set(
            "content-transfer-encoding",
            TransferEncoding::EightBit.to_string(),
        );

        self.parts.push(Part::new(headers, normalize_crlf(content)));
    }

    /// Appends a binary attachment part, base64-encoded, carrying
    /// `Content-Disposition: attachment; filename=<filename>`.
    pub fn attach_binary(&mut self, filename: &str, data: &[u8]) {
        let mut headers = Headers::new();
        headers.set("content-type", ContentType::octet_stream().to_string());
        headers.set(
            "content-transfer-encoding",
            TransferEncoding::Base64.to_string(),
        );
        headers.set(
            "content-disposition",
            format!("attachment; filename={filename}"),
        );

        self.parts
            .push(Part::new(headers, encode_base64_wrapped(data)));
    }

    /// Returns the part boundary.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the top-level headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the message parts in attachment order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Serializes the message to its wire format (CRLF line endings).
    #[must_use]
    pub fn to_wire(&self) -> String {
        let mut out = String::new();

        self.headers.write_wire(&mut out);
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str(&format!(
            "Content-Type: {}\r\n",
            ContentType::multipart_mixed(self.boundary.clone())
        ));
        out.push_str("\r\n");

        for part in &self.parts {
            out.push_str("--");
            out.push_str(&self.boundary);
            out.push_str("\r\n");
            part.headers.write_wire(&mut out);
            out.push_str("\r\n");
            out.push_str(&part.body);
            if !part.body.ends_with("\r\n") {
                out.push_str("\r\n");
            }
        }

        out.push_str("--");
        out.push_str(&self.boundary);
        out.push_str("--\r\n");

        out
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a header name/value pair before it reaches the wire.
fn check_header(name: &str, value: &str) -> Result<()> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidHeader(format!("bad header name: {name:?}")));
    }

    if value.contains('\r') || value.contains('\n') {
        return Err(Error::InvalidHeader(format!(
            "value for {name} contains a line break"
        )));
    }

    Ok(())
}

/// Normalizes bare LF line endings to CRLF.
fn normalize_crlf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n') {
        out.push_str(line.strip_suffix('\r').unwrap_or(line));
        out.push_str("\r\n");
    }
    // split('\n') yields a trailing empty piece for text ending in '\n'
    if text.ends_with('\n') {
        out.truncate(out.len() - 2);
    }
    out
}

/// Generates a process-unique part boundary.
fn next_boundary() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos() & u128::from(u64::MAX)).unwrap_or(0));

    format!("=_sendkit_{nanos:016x}_{seq:04}")
}
