//! SMTP-backed transport collaborator.

use super::{DeliveryFailures, TlsMode, Transport};
use crate::error::{Error, Result};
use sendkit_smtp::connection::{connect, connect_tls};
use sendkit_smtp::{Address, AuthMechanism, Authenticated, Client, SmtpConnection};
use tracing::debug;

/// Authenticated SMTP session implementing [`Transport`].
#[derive(Debug)]
pub struct SmtpTransport {
    client: Option<Client<Authenticated>>,
}

impl SmtpTransport {
    /// Connects to the relay, negotiates encryption, and authenticates.
    ///
    /// With [`TlsMode::StartTls`] the session starts in plain text and is
    /// upgraded before credentials travel; with [`TlsMode::Implicit`] the
    /// connection is encrypted from the first byte. PLAIN authentication is
    /// preferred, falling back to LOGIN when it is all the relay offers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when the relay rejects the
    /// credentials and [`Error::Transport`] for connection or protocol
    /// failures.
    pub fn connect(
        host: &str,
        port: u16,
        tls: TlsMode,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let stream = match tls {
            TlsMode::Implicit => connect_tls(host, port)?,
            TlsMode::StartTls => connect(host, port)?,
        };

        let client = Client::from_stream(stream)?;
        let client = client.ehlo("localhost")?;

        let client = match tls {
            TlsMode::StartTls => client.starttls(host)?,
            TlsMode::Implicit => client,
        };

        let mechanisms = client.server_info().auth_mechanisms();
        let login_only = !mechanisms.is_empty()
            && !mechanisms.contains(&AuthMechanism::Plain)
            && mechanisms.contains(&AuthMechanism::Login);

        let authenticated = if login_only {
            client.auth_login(username, password)
        } else {
            client.auth_plain(username, password)
        };

        let client = authenticated.map_err(|e| {
            if e.is_auth_failure() {
                Error::Authentication(e.to_string())
            } else {
                Error::Transport(e)
            }
        })?;

        debug!(host, port, "SMTP session established");
        Ok(Self {
            client: Some(client),
        })
    }
}

impl Transport for SmtpTransport {
    fn send_message(
        &mut self,
        from: &str,
        recipients: &[String],
        message: &str,
    ) -> Result<DeliveryFailures> {
        let client = self
            .client
            .as_mut()
            .ok_or_else(|| Error::Authentication("SMTP session already closed".into()))?;

        let from = Address::new(from)?;
        let envelope = recipients
            .iter()
            .map(Address::new)
            .collect::<sendkit_smtp::Result<Vec<_>>>()?;

        Ok(client.send_mail(&from, &envelope, message.as_bytes())?)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.quit()?;
        }
        Ok(())
    }
}
