//! # sendkit-mime
//!
//! MIME generation for outgoing email.
//!
//! ## Features
//!
//! - **Message generation**: Build `multipart/mixed` messages with text
//!   bodies and binary attachments
//! - **Encoding**: Base64 part bodies, RFC 2047 header encoding
//! - **Headers**: Case-insensitive header collection with deterministic
//!   serialization
//!
//! ## Quick Start
//!
//! ```
//! use sendkit_mime::{ContentType, Message};
//!
//! # fn main() -> sendkit_mime::Result<()> {
//! let mut message = Message::new();
//! message.set_header("From", "sender@example.com")?;
//! message.set_text_header("Subject", "Monthly report")?;
//! message.attach_text("<p>See attached.</p>", &ContentType::text_html());
//! message.attach_binary("report.csv", b"a,b\n1,2\n");
//!
//! let wire = message.to_wire();
//! assert!(wire.contains("MIME-Version: 1.0"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;
mod header;
mod message;

pub mod encoding;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Message, Part, TransferEncoding};
