//! Encoding utilities for outgoing messages.
//!
//! Supports Base64 bodies and RFC 2047 header encoding.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum line length for encoded bodies (RFC 2045).
const MAX_LINE_LENGTH: usize = 76;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Encodes data as Base64 split into 76-column lines with CRLF endings,
/// ready to be used as a message part body.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = encode_base64(data);
    let mut result = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2 + 2);

    let bytes = encoded.as_bytes();
    for chunk in bytes.chunks(MAX_LINE_LENGTH) {
        // Base64 output is always ASCII
        result.push_str(&String::from_utf8_lossy(chunk));
        result.push_str("\r\n");
    }

    result
}

/// Encodes a header value using RFC 2047 encoding if it is not plain ASCII.
///
/// Format: `=?utf-8?B?encoded-text?=`
#[must_use]
pub fn encode_rfc2047(text: &str) -> String {
    // Only encode if necessary (contains non-ASCII or RFC 2047 markers)
    if text.chars().all(|c| c.is_ascii() && c != '=' && c != '?') {
        return text.to_string();
    }

    let encoded = encode_base64(text.as_bytes());
    format!("=?utf-8?B?{encoded}?=")
}
