//! Transport collaborators that deliver composed messages.

mod smtp;

pub use smtp::SmtpTransport;

use crate::error::Result;
use std::collections::BTreeMap;

/// How the connection to the relay is encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS before credentials are sent.
    StartTls,
    /// TLS from the first byte (implicit TLS, port 465 style).
    Implicit,
}

/// Per-recipient delivery failures reported by a transport.
///
/// Maps each failed envelope recipient to the relay's `(code, reason)`.
/// An empty map means every recipient was accepted.
pub type DeliveryFailures = BTreeMap<String, (u16, String)>;

/// A collaborator holding an authenticated session with a mail relay.
///
/// [`Email::login_with`](crate::Email::login_with) accepts any
/// implementation, which is also the seam tests use to capture composed
/// messages without a network.
pub trait Transport {
    /// Delivers `message` from `from` to every address in `recipients`.
    ///
    /// Blocks until the relay has answered. Per-recipient refusals are
    /// reported through the returned map rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the session fails at the connection or protocol
    /// level.
    fn send_message(
        &mut self,
        from: &str,
        recipients: &[String],
        message: &str,
    ) -> Result<DeliveryFailures>;

    /// Ends the session with the relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be shut down cleanly.
    fn close(&mut self) -> Result<()>;
}
