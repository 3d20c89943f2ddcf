//! Wire encoding for client-issued SMTP commands.

use crate::types::{Address, AuthMechanism};
use std::fmt;

/// A command the client can issue during a session.
///
/// `Display` renders the command text without the trailing CRLF;
/// [`Command::to_line`] produces the complete wire line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `EHLO` with the client's hostname.
    Ehlo {
        /// Hostname the client identifies itself with.
        hostname: String,
    },
    /// `STARTTLS` upgrade request.
    StartTls,
    /// `AUTH`, optionally carrying a SASL initial response.
    Auth {
        /// Mechanism to negotiate.
        mechanism: AuthMechanism,
        /// Base64 initial response (SASL-IR), if the mechanism has one.
        initial_response: Option<String>,
    },
    /// `MAIL FROM`, opening a mail transaction.
    MailFrom {
        /// Envelope sender.
        from: Address,
        /// Message size in bytes, sent when the server advertises SIZE.
        size: Option<usize>,
    },
    /// `RCPT TO`, naming one envelope recipient.
    RcptTo {
        /// Envelope recipient.
        to: Address,
    },
    /// `DATA`, announcing the message content.
    Data,
    /// `RSET`, abandoning the current transaction.
    Rset,
    /// `QUIT`, ending the session.
    Quit,
}

impl Command {
    /// Renders the command as one CRLF-terminated line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{self}\r\n")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ehlo { hostname } => write!(f, "EHLO {hostname}"),
            Self::StartTls => f.write_str("STARTTLS"),
            Self::Auth {
                mechanism,
                initial_response: Some(response),
            } => write!(f, "AUTH {} {response}", mechanism.as_str()),
            Self::Auth {
                mechanism,
                initial_response: None,
            } => write!(f, "AUTH {}", mechanism.as_str()),
            Self::MailFrom {
                from,
                size: Some(size),
            } => write!(f, "MAIL FROM:<{from}> SIZE={size}"),
            Self::MailFrom { from, size: None } => write!(f, "MAIL FROM:<{from}>"),
            Self::RcptTo { to } => write!(f, "RCPT TO:<{to}>"),
            Self::Data => f.write_str("DATA"),
            Self::Rset => f.write_str("RSET"),
            Self::Quit => f.write_str("QUIT"),
        }
    }
}
