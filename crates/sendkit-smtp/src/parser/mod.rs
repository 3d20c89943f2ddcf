//! Reply-line parsing.
//!
//! Replies arrive as one or more lines. Continuation lines carry `-`
//! after the code (`250-STARTTLS`); the final line carries a space or
//! nothing at all (`250 OK`, `354`).

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Assembles a [`Reply`] from the raw lines of one server response.
///
/// The code is taken from the first line; every line contributes its text
/// with the code and separator stripped.
///
/// # Errors
///
/// Returns [`Error::Protocol`] when a line is too short to carry a code or
/// the code is not numeric.
pub fn parse_reply(raw: &[String]) -> Result<Reply> {
    let first = raw
        .first()
        .ok_or_else(|| Error::Protocol("server reply was empty".into()))?;

    let code = first
        .get(..3)
        .and_then(|digits| digits.parse::<u16>().ok())
        .ok_or_else(|| Error::Protocol(format!("unparseable reply line: {first:?}")))?;

    let mut lines = Vec::with_capacity(raw.len());
    for line in raw {
        if let Some(text) = line.get(4..) {
            lines.push(text.to_string());
        } else if line.len() == 3 {
            // A bare code is a valid final line
            lines.push(String::new());
        } else {
            return Err(Error::Protocol(format!("unparseable reply line: {line:?}")));
        }
    }

    Ok(Reply::new(ReplyCode::new(code), lines))
}

/// True when `line` terminates a reply (no `-` continuation marker).
#[must_use]
pub fn is_last_reply_line(line: &str) -> bool {
    line.as_bytes().get(3) != Some(&b'-')
}
