//! # sendkit-smtp
//!
//! A blocking SMTP client for authenticated message submission (RFC 5321
//! subset).
//!
//! ## Features
//!
//! - **Type-state connection management**: Compile-time enforcement of the
//!   connect → authenticate → transact sequence
//! - **TLS support**: Both implicit TLS (port 465) and STARTTLS
//! - **Authentication**: PLAIN and LOGIN
//! - **Per-recipient refusal reporting**: A mail transaction returns the
//!   map of refused envelope recipients instead of failing on the first one
//!
//! Every call blocks the calling thread until the server answers; there is
//! no background work and no built-in retry.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sendkit_smtp::{Address, Client};
//! use sendkit_smtp::connection::connect;
//!
//! fn main() -> sendkit_smtp::Result<()> {
//!     let stream = connect("smtp.example.com", 587)?;
//!     let client = Client::from_stream(stream)?;
//!
//!     let client = client.ehlo("localhost")?;
//!     let client = client.starttls("smtp.example.com")?;
//!     let mut client = client.auth_plain("user@example.com", "password")?;
//!
//!     let from = Address::new("sender@example.com")?;
//!     let to = [Address::new("recipient@example.com")?];
//!
//!     let message = b"Subject: Test\r\n\r\nHello, World!\r\n";
//!     let refused = client.send_mail(&from, &to, message)?;
//!     assert!(refused.is_empty());
//!
//!     client.quit()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builders
//! - [`connection`]: Connection management and type-state client
//! - [`parser`]: Response parser
//! - [`types`]: Core SMTP types (addresses, extensions, replies)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use connection::{
    Authenticated, Client, Connected, RecipientRefusals, ServerInfo, SmtpConnection,
};
pub use error::{Error, Result};
pub use types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
