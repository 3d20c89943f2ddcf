//! # sendkit
//!
//! Builder-style email composition and delivery over SMTP.
//!
//! A draft collects a subject, a body (plain or HTML), attachments under a
//! combined size budget, and three mutually exclusive recipient sets
//! (To/Cc/Bcc), each validated by a per-scope pluggable predicate. Sending
//! composes a `multipart/mixed` message and hands it to an authenticated
//! SMTP session.
//!
//! Everything is synchronous and blocking: each call runs to completion on
//! the calling thread, and a draft belongs to one caller at a time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sendkit::{Email, TlsMode};
//!
//! # fn main() -> sendkit::Result<()> {
//! let mut email = Email::new("smtp.example.com", 587);
//! email.login("report-bot@example.com", "app-password", TlsMode::StartTls)?;
//!
//! email
//!     .set_subject("Nightly report")
//!     .set_body("<h1>All green</h1>");
//! email.add_recipient("team@example.com")?;
//! email.add_cc("manager@example.com")?;
//! email.add_attachment("report.csv")?;
//!
//! email.send()?;
//! email.logout()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom validation
//!
//! ```
//! use sendkit::Email;
//!
//! # fn main() -> sendkit::Result<()> {
//! let mut email = Email::new("smtp.examplecorp.com", 587);
//! email.set_validator(
//!     |addr: &str| addr.ends_with("@examplecorp.com"),
//!     &["author", "to"],
//! )?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content;
mod error;
mod message;
pub mod transport;
pub mod validate;

pub use content::{BodyKind, HtmlClassifier, looks_like_html};
pub use error::{Error, Result};
pub use message::{DEFAULT_SIZE_LIMIT, Email, EmailConfig};
pub use transport::{DeliveryFailures, SmtpTransport, TlsMode, Transport};
pub use validate::{Scope, Validator, ValidatorSet, default_validator};
