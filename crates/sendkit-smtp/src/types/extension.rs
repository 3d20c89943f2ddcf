//! EHLO capability keywords.

/// A capability advertised in the EHLO response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    /// `STARTTLS`: the connection can be upgraded to TLS.
    StartTls,
    /// `AUTH` with the mechanisms this client can negotiate.
    Auth(Vec<AuthMechanism>),
    /// `SIZE`, optionally carrying the advertised maximum in bytes.
    Size(Option<usize>),
    /// `8BITMIME`.
    EightBitMime,
    /// `PIPELINING`.
    Pipelining,
    /// `SMTPUTF8`.
    SmtpUtf8,
    /// Anything this client does not model, kept verbatim.
    Unknown(String),
}

impl Extension {
    /// Reads one EHLO capability line.
    ///
    /// Unrecognized keywords land in [`Extension::Unknown`]; mechanisms on
    /// an `AUTH` line that this client cannot negotiate are dropped.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (keyword, params) = line.split_once(' ').unwrap_or((line, ""));

        match keyword.to_ascii_uppercase().as_str() {
            "STARTTLS" => Self::StartTls,
            "AUTH" => Self::Auth(
                params
                    .split_whitespace()
                    .filter_map(AuthMechanism::parse)
                    .collect(),
            ),
            "SIZE" => Self::Size(params.split_whitespace().next().and_then(|v| v.parse().ok())),
            "8BITMIME" => Self::EightBitMime,
            "PIPELINING" => Self::Pipelining,
            "SMTPUTF8" => Self::SmtpUtf8,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// A SASL mechanism this client can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMechanism {
    /// `PLAIN`: single base64 response carrying both identity and password.
    Plain,
    /// `LOGIN`: two-step challenge/response, still in common use.
    Login,
}

impl AuthMechanism {
    /// Maps a mechanism word from an AUTH capability line.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("PLAIN") {
            Some(Self::Plain)
        } else if word.eq_ignore_ascii_case("LOGIN") {
            Some(Self::Login)
        } else {
            None
        }
    }

    /// Returns the mechanism keyword as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::Login => "LOGIN",
        }
    }
}
