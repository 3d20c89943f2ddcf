//! Type-state SMTP client.

use super::{ServerInfo, SmtpStream};
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_last_reply_line, parse_reply};
use crate::types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::{BTreeMap, HashSet};
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Type-state marker for connected state.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker for authenticated state.
#[derive(Debug)]
pub struct Authenticated;

/// Per-recipient delivery refusals from one mail transaction.
///
/// Maps the refused envelope address to the server's `(code, reason)`.
/// An empty map means every recipient was accepted.
pub type RecipientRefusals = BTreeMap<String, (u16, String)>;

/// SMTP client with type-state pattern.
///
/// A freshly connected client is `Client<Connected>`; authentication
/// produces a `Client<Authenticated>` that can run mail transactions.
#[derive(Debug)]
pub struct Client<State> {
    stream: SmtpStream,
    server_info: ServerInfo,
    _state: PhantomData<State>,
}

/// Connection trait for all states.
pub trait SmtpConnection {
    /// Returns the server information.
    fn server_info(&self) -> &ServerInfo;
}

impl<S> SmtpConnection for Client<S> {
    fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }
}

impl Client<Connected> {
    /// Creates a client from a stream and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or if the server
    /// returns an error.
    pub fn from_stream(mut stream: SmtpStream) -> Result<Self> {
        let greeting = Self::read_reply(&mut stream)?;
        if greeting.code != ReplyCode::SERVICE_READY {
            return Err(refusal(&greeting));
        }

        // Extract hostname from greeting (first word after code)
        let hostname = greeting
            .lines
            .first()
            .and_then(|msg| msg.split_whitespace().next())
            .unwrap_or("unknown")
            .to_string();

        debug!(server = %hostname, "received SMTP greeting");

        Ok(Self {
            stream,
            server_info: ServerInfo {
                hostname,
                extensions: HashSet::new(),
            },
            _state: PhantomData,
        })
    }

    /// Sends EHLO and discovers server capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the EHLO command fails.
    pub fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        let reply = self.send_command(&Command::Ehlo {
            hostname: client_hostname.to_string(),
        })?;

        if !reply.is_success() {
            return Err(refusal(&reply));
        }

        self.server_info.extensions = parse_extensions(&reply);
        debug!(
            extensions = self.server_info.extensions.len(),
            "EHLO completed"
        );
        Ok(self)
    }

    /// Upgrades the connection to TLS using STARTTLS and re-issues EHLO.
    ///
    /// # Errors
    ///
    /// Returns an error if STARTTLS is not supported or if the upgrade fails.
    pub fn starttls(mut self, hostname: &str) -> Result<Self> {
        if !self.server_info.supports_starttls() {
            return Err(Error::NotSupported("STARTTLS".into()));
        }

        let reply = self.send_command(&Command::StartTls)?;
        if reply.code != ReplyCode::SERVICE_READY {
            return Err(refusal(&reply));
        }

        self.stream = self.stream.upgrade_to_tls(hostname)?;
        debug!(server = %hostname, "connection upgraded to TLS");

        // Capabilities may differ on the encrypted channel
        let reply = self.send_command(&Command::Ehlo {
            hostname: hostname.to_string(),
        })?;

        if !reply.is_success() {
            return Err(refusal(&reply));
        }

        self.server_info.extensions = parse_extensions(&reply);
        Ok(self)
    }

    /// Authenticates using the PLAIN mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn auth_plain(mut self, username: &str, password: &str) -> Result<Client<Authenticated>> {
        // Build PLAIN response: \0username\0password
        let credentials = format!("\0{username}\0{password}");
        let encoded = STANDARD.encode(credentials.as_bytes());

        let reply = self.send_command(&Command::Auth {
            mechanism: AuthMechanism::Plain,
            initial_response: Some(encoded),
        })?;

        if !reply.is_success() {
            return Err(refusal(&reply));
        }

        debug!(mechanism = "PLAIN", "authentication accepted");
        Ok(Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        })
    }

    /// Authenticates using the LOGIN challenge/response mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn auth_login(mut self, username: &str, password: &str) -> Result<Client<Authenticated>> {
        let reply = self.send_command(&Command::Auth {
            mechanism: AuthMechanism::Login,
            initial_response: None,
        })?;
        if reply.code != ReplyCode::AUTH_CONTINUE {
            return Err(refusal(&reply));
        }

        // Username challenge, then password challenge, both base64-encoded
        let encoded = STANDARD.encode(username.as_bytes());
        self.stream.write_all(format!("{encoded}\r\n").as_bytes())?;
        let reply = Self::read_reply(&mut self.stream)?;
        if reply.code != ReplyCode::AUTH_CONTINUE {
            return Err(refusal(&reply));
        }

        let encoded = STANDARD.encode(password.as_bytes());
        self.stream.write_all(format!("{encoded}\r\n").as_bytes())?;
        let reply = Self::read_reply(&mut self.stream)?;
        if !reply.is_success() {
            return Err(refusal(&reply));
        }

        debug!(mechanism = "LOGIN", "authentication accepted");
        Ok(Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        })
    }
}

impl Client<Authenticated> {
    /// Runs one mail transaction: `MAIL FROM`, `RCPT TO` per recipient,
    /// `DATA`, then the dot-stuffed message body.
    ///
    /// Recipients the server refuses with a 4xx/5xx reply are collected into
    /// the returned [`RecipientRefusals`] map instead of aborting the
    /// transaction. If no recipient is accepted the transaction is reset and
    /// nothing is transmitted; the refusal map still describes every
    /// rejection.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O or protocol failures, or when the server
    /// rejects the sender or the message data itself.
    pub fn send_mail(
        &mut self,
        from: &Address,
        recipients: &[Address],
        message: &[u8],
    ) -> Result<RecipientRefusals> {
        let size = self
            .server_info
            .max_message_size()
            .map(|_| message.len());

        let reply = self.send_command(&Command::MailFrom {
            from: from.clone(),
            size,
        })?;
        if !reply.is_success() {
            return Err(refusal(&reply));
        }

        let mut refused = RecipientRefusals::new();
        let mut accepted = 0_usize;
        for to in recipients {
            let reply = self.send_command(&Command::RcptTo { to: to.clone() })?;
            if reply.is_success() {
                accepted += 1;
            } else {
                warn!(recipient = %to, code = reply.code.as_u16(), "recipient refused");
                refused.insert(
                    to.as_str().to_string(),
                    (reply.code.as_u16(), reply.text()),
                );
            }
        }

        if accepted == 0 {
            // No one to deliver to; abandon the transaction
            let reply = self.send_command(&Command::Rset)?;
            if !reply.is_success() {
                return Err(refusal(&reply));
            }
            return Ok(refused);
        }

        let reply = self.send_command(&Command::Data)?;
        if reply.code != ReplyCode::START_DATA {
            return Err(refusal(&reply));
        }

        // Normalize line endings to CRLF and byte-stuff leading dots
        for line in message.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.first() == Some(&b'.') {
                self.stream.write_all(b".")?;
            }
            self.stream.write_all(line)?;
            self.stream.write_all(b"\r\n")?;
        }
        self.stream.write_all(b".\r\n")?;

        let reply = Self::read_reply(&mut self.stream)?;
        if !reply.is_success() {
            return Err(refusal(&reply));
        }

        debug!(accepted, refused = refused.len(), "message transmitted");
        Ok(refused)
    }
}

// Common implementation for all states
impl<S> Client<S> {
    fn send_command(&mut self, cmd: &Command) -> Result<Reply> {
        self.stream.write_all(cmd.to_line().as_bytes())?;
        Self::read_reply(&mut self.stream)
    }

    fn read_reply(stream: &mut SmtpStream) -> Result<Reply> {
        let mut lines = Vec::new();
        loop {
            let line = stream.read_line()?;
            if line.is_empty() {
                continue;
            }

            let is_last = is_last_reply_line(&line);
            lines.push(line);

            if is_last {
                break;
            }
        }

        parse_reply(&lines)
    }

    /// Sends QUIT and closes the connection (available in any state).
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT command fails.
    pub fn quit(mut self) -> Result<()> {
        let reply = self.send_command(&Command::Quit)?;

        if !reply.is_success() && reply.code != ReplyCode::CLOSING {
            return Err(refusal(&reply));
        }

        Ok(())
    }
}

/// Maps a non-success reply to the error surfaced to callers.
fn refusal(reply: &Reply) -> Error {
    Error::smtp(reply.code.as_u16(), reply.text())
}

/// Parses extensions from an EHLO reply (first line is the server greeting).
fn parse_extensions(reply: &Reply) -> HashSet<Extension> {
    reply
        .lines
        .iter()
        .skip(1)
        .map(|line| Extension::parse(line))
        .collect()
}
