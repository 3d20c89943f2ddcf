//! The email draft: composition state, recipient partitioning, attachment
//! budgeting, and delivery.

use crate::content::{BodyKind, HtmlClassifier, apply_default_styling, looks_like_html};
use crate::error::{Error, Result};
use crate::transport::{SmtpTransport, TlsMode, Transport};
use crate::validate::{Scope, Validator, ValidatorSet};
use chrono::{DateTime, Local};
use sendkit_mime::{ContentType, Message};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default limit on the combined size of all attachments (25 MiB).
pub const DEFAULT_SIZE_LIMIT: u64 = 26_214_400;

/// Format of the Date header, filled from the draft's creation time.
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const DEFAULT_SUBJECT: &str = "<no subject>";
const DEFAULT_BODY: &str = "<no body>";

/// Configuration for a draft: relay coordinates plus the attachment budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// SMTP relay hostname.
    pub host: String,
    /// SMTP relay port.
    pub port: u16,
    /// Combined attachment size limit in bytes.
    pub size_limit: u64,
}

impl EmailConfig {
    /// Creates a config with the default attachment size limit.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// Overrides the attachment size limit.
    #[must_use]
    pub fn with_size_limit(mut self, limit: u64) -> Self {
        self.size_limit = limit;
        self
    }
}

/// A mutable email draft.
///
/// A draft is created empty, mutated through builder-style calls in any
/// order and repetition, and handed off with [`Email::send`]. Mutating
/// methods return the same draft handle so calls can be chained.
///
/// The draft stays open after a successful send and may be mutated and sent
/// again; create a fresh draft per logical message when that is not wanted.
/// A draft belongs to one caller; share across threads only with external
/// serialization.
pub struct Email {
    config: EmailConfig,
    subject: String,
    body: String,
    body_kind: BodyKind,
    attachments: BTreeSet<PathBuf>,
    to: BTreeSet<String>,
    cc: BTreeSet<String>,
    bcc: BTreeSet<String>,
    remaining: u64,
    validators: ValidatorSet,
    classifier: HtmlClassifier,
    sender: Option<String>,
    transport: Option<Box<dyn Transport>>,
    created_at: DateTime<Local>,
}

impl Email {
    /// Creates an empty draft bound to a relay, with the default attachment
    /// size limit.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_config(EmailConfig::new(host, port))
    }

    /// Creates an empty draft from an explicit configuration.
    #[must_use]
    pub fn with_config(config: EmailConfig) -> Self {
        let remaining = config.size_limit;
        Self {
            config,
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
            body_kind: BodyKind::Plain,
            attachments: BTreeSet::new(),
            to: BTreeSet::new(),
            cc: BTreeSet::new(),
            bcc: BTreeSet::new(),
            remaining,
            validators: ValidatorSet::default(),
            classifier: Arc::new(looks_like_html),
            sender: None,
            transport: None,
            created_at: Local::now(),
        }
    }

    /// Authenticates with the configured relay and assigns the sender.
    ///
    /// The username is validated against the `author` scope before any
    /// connection is made. The sender can be assigned once per draft.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyLoggedIn`] if a sender is already assigned,
    /// [`Error::InvalidAddress`] if the username fails the author validator,
    /// [`Error::Authentication`] if the relay rejects the credentials, and
    /// [`Error::Transport`] for connection failures.
    pub fn login(&mut self, username: &str, password: &str, tls: TlsMode) -> Result<&mut Self> {
        if self.sender.is_some() {
            return Err(Error::AlreadyLoggedIn);
        }
        self.validate(username, Scope::Author)?;

        let transport =
            SmtpTransport::connect(&self.config.host, self.config.port, tls, username, password)?;

        self.sender = Some(username.to_string());
        self.transport = Some(Box::new(transport));
        Ok(self)
    }

    /// Assigns the sender and an externally built transport session.
    ///
    /// This is the seam for custom relays and for tests: anything
    /// implementing [`Transport`] can stand in for the SMTP session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyLoggedIn`] if a sender is already assigned
    /// and [`Error::InvalidAddress`] if the sender fails the author
    /// validator.
    pub fn login_with(
        &mut self,
        transport: impl Transport + 'static,
        sender: &str,
    ) -> Result<&mut Self> {
        if self.sender.is_some() {
            return Err(Error::AlreadyLoggedIn);
        }
        self.validate(sender, Scope::Author)?;

        self.sender = Some(sender.to_string());
        self.transport = Some(Box::new(transport));
        Ok(self)
    }

    /// Ends the session with the relay, if one is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot shut down cleanly.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(mut transport) = self.transport.take() {
            transport.close()?;
        }
        Ok(())
    }

    /// Sets the subject line.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = subject.into();
        self
    }

    /// Sets the body, choosing the content kind with the HTML classifier.
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        let body = body.into();
        self.body_kind = if (self.classifier)(&body) {
            BodyKind::Html
        } else {
            BodyKind::Plain
        };
        self.body = body;
        self
    }

    /// Sets the body with an explicit content kind.
    ///
    /// A [`BodyKind::Plain`] body must not contain HTML markup. A
    /// [`BodyKind::Html`] body that carries no markup is wrapped in the
    /// default styled container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Body`] if a plain body contains HTML markup
    /// according to the active classifier.
    pub fn set_body_as(&mut self, body: impl Into<String>, kind: BodyKind) -> Result<&mut Self> {
        let body = body.into();
        let has_markup = (self.classifier)(&body);

        self.body = match kind {
            BodyKind::Plain => {
                if has_markup {
                    return Err(Error::Body(
                        "plain-text bodies cannot contain HTML markup".to_string(),
                    ));
                }
                body
            }
            BodyKind::Html if has_markup => body,
            BodyKind::Html => apply_default_styling(&body),
        };
        self.body_kind = kind;
        Ok(self)
    }

    /// Reads the body from a file, with an explicit content kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Body`] if the path is not a readable regular file
    /// or if a plain body would contain HTML markup.
    pub fn set_body_from_file(
        &mut self,
        path: impl AsRef<Path>,
        kind: BodyKind,
    ) -> Result<&mut Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Body(format!(
                "cannot read body from {}: not a regular file",
                path.display()
            )));
        }

        let body = fs::read_to_string(path)?;
        self.set_body_as(body, kind)
    }

    /// Replaces the HTML classifier used by the body setters.
    pub fn set_html_classifier(
        &mut self,
        classifier: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Replaces the address validator for the named scopes.
    ///
    /// Scope names are drawn from `all`, `author`, `to`, `cc` and `bcc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unrecognized scope name; no
    /// scope is replaced in that case.
    pub fn set_validator<S: AsRef<str>>(
        &mut self,
        validator: impl Fn(&str) -> bool + Send + Sync + 'static,
        scopes: &[S],
    ) -> Result<&mut Self> {
        let validator: Validator = Arc::new(validator);
        self.validators.set(validator, scopes)?;
        Ok(self)
    }

    /// Adds a direct recipient.
    ///
    /// A no-op if the address is already CC'd or BCC'd (first write wins
    /// across the three scopes).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the address fails the `to`
    /// validator; nothing is inserted.
    pub fn add_recipient(&mut self, address: &str) -> Result<&mut Self> {
        self.validate(address, Scope::To)?;
        if !self.cc.contains(address) && !self.bcc.contains(address) {
            self.to.insert(address.to_string());
        }
        Ok(self)
    }

    /// Adds a CC recipient.
    ///
    /// A no-op if the address is already a direct recipient or BCC'd.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the address fails the `cc`
    /// validator; nothing is inserted.
    pub fn add_cc(&mut self, address: &str) -> Result<&mut Self> {
        self.validate(address, Scope::Cc)?;
        if !self.to.contains(address) && !self.bcc.contains(address) {
            self.cc.insert(address.to_string());
        }
        Ok(self)
    }

    /// Adds a BCC recipient.
    ///
    /// A no-op if the address is already a direct recipient or CC'd.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the address fails the `bcc`
    /// validator; nothing is inserted.
    pub fn add_bcc(&mut self, address: &str) -> Result<&mut Self> {
        self.validate(address, Scope::Bcc)?;
        if !self.to.contains(address) && !self.cc.contains(address) {
            self.bcc.insert(address.to_string());
        }
        Ok(self)
    }

    /// Adds a file attachment, charged against the draft's size budget.
    ///
    /// The path is resolved to a canonical absolute path first. Re-adding
    /// an attachment is a no-op, as is a zero-byte file (whatever it is).
    /// Each call either admits the whole file or changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentNotFile`] if the path does not resolve to
    /// a regular file, and [`Error::AttachmentBudget`] if admitting the file
    /// would exceed the remaining budget.
    pub fn add_attachment(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let original = path.as_ref();
        let Ok(path) = fs::canonicalize(original) else {
            return Err(Error::AttachmentNotFile {
                path: original.to_path_buf(),
            });
        };

        if self.attachments.contains(&path) {
            return Ok(self);
        }

        let Ok(metadata) = fs::metadata(&path) else {
            return Err(Error::AttachmentNotFile { path });
        };

        if metadata.len() == 0 {
            return Ok(self);
        }

        if !metadata.is_file() {
            return Err(Error::AttachmentNotFile { path });
        }

        let Some(remaining) = self.remaining.checked_sub(metadata.len()) else {
            return Err(Error::AttachmentBudget {
                path,
                limit: self.config.size_limit,
            });
        };

        self.attachments.insert(path);
        self.remaining = remaining;
        Ok(self)
    }

    /// Composes the draft and hands it to the transport session.
    ///
    /// Fails when no session is open or when the direct recipient set is
    /// empty; CC/BCC-only drafts are rejected. The envelope is the union of
    /// the `to`, `cc` and `bcc` sets. If the relay refuses any recipient,
    /// one refusal is surfaced as [`Error::Send`].
    ///
    /// The draft is returned for chaining and stays open afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] without an open session,
    /// [`Error::EmptyRecipients`] without direct recipients,
    /// [`Error::Send`] for refused recipients, and [`Error::Io`] /
    /// [`Error::Transport`] for attachment reads and session failures.
    pub fn send(&mut self) -> Result<&mut Self> {
        let sender = self.sender.clone().ok_or_else(|| {
            Error::Authentication("no open session; call login() first".to_string())
        })?;

        if self.to.is_empty() {
            return Err(Error::EmptyRecipients);
        }

        let wire = self.compose(&sender)?;
        let envelope: Vec<String> = self
            .to
            .iter()
            .chain(self.cc.iter())
            .chain(self.bcc.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let transport = self.transport.as_mut().ok_or_else(|| {
            Error::Authentication("no open session; call login() first".to_string())
        })?;

        let failures = transport.send_message(&sender, &envelope, &wire)?;
        if let Some((address, (code, reason))) = failures.into_iter().next() {
            return Err(Error::Send {
                address,
                code,
                reason,
            });
        }

        Ok(self)
    }

    /// Builds the wire-format MIME message for this draft.
    fn compose(&self, sender: &str) -> Result<String> {
        let mut message = Message::new();
        message.set_text_header("Subject", &self.subject)?;
        message.set_header("From", sender)?;
        message.set_header("Date", &self.created_at.format(DATE_FORMAT).to_string())?;
        // The Cc header is always present, empty value included
        let cc = self.cc.iter().map(String::as_str).collect::<Vec<_>>();
        message.set_header("Cc", &cc.join(","))?;

        let content_type = match self.body_kind {
            BodyKind::Plain => ContentType::text_plain(),
            BodyKind::Html => ContentType::text_html(),
        };
        message.attach_text(&self.body, &content_type);

        for path in &self.attachments {
            let data = fs::read(path)?;
            let filename = path.file_name().map_or_else(
                || "attachment".to_string(),
                |name| name.to_string_lossy().into_owned(),
            );
            message.attach_binary(&filename, &data);
        }

        Ok(message.to_wire())
    }

    fn validate(&self, address: &str, scope: Scope) -> Result<()> {
        if (self.validators.get(scope))(address) {
            Ok(())
        } else {
            Err(Error::InvalidAddress {
                address: address.to_string(),
                scope,
            })
        }
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the body content.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the body's content kind.
    #[must_use]
    pub const fn body_kind(&self) -> BodyKind {
        self.body_kind
    }

    /// Returns the direct recipient set.
    #[must_use]
    pub const fn recipients(&self) -> &BTreeSet<String> {
        &self.to
    }

    /// Returns the CC set.
    #[must_use]
    pub const fn cc(&self) -> &BTreeSet<String> {
        &self.cc
    }

    /// Returns the BCC set.
    #[must_use]
    pub const fn bcc(&self) -> &BTreeSet<String> {
        &self.bcc
    }

    /// Returns the admitted attachments, by canonical path.
    #[must_use]
    pub const fn attachments(&self) -> &BTreeSet<PathBuf> {
        &self.attachments
    }

    /// Returns the configured combined attachment size limit.
    #[must_use]
    pub const fn size_limit(&self) -> u64 {
        self.config.size_limit
    }

    /// Returns how many attachment bytes the draft can still admit.
    #[must_use]
    pub const fn remaining_budget(&self) -> u64 {
        self.remaining
    }

    /// Returns the assigned sender, if login has happened.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the draft's creation time (used for the Date header).
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Email")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("sender", &self.sender)
            .field("subject", &self.subject)
            .field("to", &self.to)
            .field("cc", &self.cc)
            .field("bcc", &self.bcc)
            .field("attachments", &self.attachments)
            .field("remaining_budget", &self.remaining)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transport::DeliveryFailures;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Transport double that records handoffs and answers with canned
    /// refusals.
    #[derive(Default)]
    struct MockTransport {
        sent: Arc<Mutex<Vec<(String, Vec<String>, String)>>>,
        refusals: DeliveryFailures,
    }

    impl Transport for MockTransport {
        fn send_message(
            &mut self,
            from: &str,
            recipients: &[String],
            message: &str,
        ) -> Result<DeliveryFailures> {
            self.sent.lock().unwrap().push((
                from.to_string(),
                recipients.to_vec(),
                message.to_string(),
            ));
            Ok(self.refusals.clone())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn temp_file(contents: &[u8]) -> PathBuf {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "sendkit-draft-{}-{seq}.bin",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    fn draft() -> Email {
        Email::new("smtp.example.com", 587)
    }

    #[test]
    fn test_defaults() {
        let email = draft();
        assert_eq!(email.subject(), "<no subject>");
        assert_eq!(email.body(), "<no body>");
        assert_eq!(email.body_kind(), BodyKind::Plain);
        assert_eq!(email.remaining_budget(), DEFAULT_SIZE_LIMIT);
        assert!(email.sender().is_none());
    }

    #[test]
    fn test_budget_walk() {
        let mut email = Email::with_config(
            EmailConfig::new("smtp.example.com", 587).with_size_limit(60),
        );
        let small = temp_file(&[b'a'; 30]);
        let large = temp_file(&[b'b'; 70]);

        email.add_attachment(&small).unwrap();
        assert_eq!(email.remaining_budget(), 30);

        let err = email.add_attachment(&large).unwrap_err();
        assert!(matches!(err, Error::AttachmentBudget { limit: 60, .. }));
        assert_eq!(email.remaining_budget(), 30);
        assert_eq!(email.attachments().len(), 1);

        // Re-adding the admitted file changes nothing
        email.add_attachment(&small).unwrap();
        assert_eq!(email.remaining_budget(), 30);
        assert_eq!(email.attachments().len(), 1);
    }

    #[test]
    fn test_zero_byte_attachment_is_skipped() {
        let mut email = Email::with_config(
            EmailConfig::new("smtp.example.com", 587).with_size_limit(10),
        );
        let empty = temp_file(b"");

        email.add_attachment(&empty).unwrap();
        assert!(email.attachments().is_empty());
        assert_eq!(email.remaining_budget(), 10);
    }

    #[test]
    fn test_missing_attachment() {
        let mut email = draft();
        let err = email
            .add_attachment("/definitely/not/here.bin")
            .unwrap_err();
        assert!(matches!(err, Error::AttachmentNotFile { .. }));
    }

    #[test]
    fn test_directory_attachment() {
        let mut email = draft();
        let err = email.add_attachment(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, Error::AttachmentNotFile { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_size_non_regular_file_never_raises() {
        let mut email = draft();
        email.add_attachment("/dev/null").unwrap();
        assert!(email.attachments().is_empty());
    }

    #[test]
    fn test_partition_bcc_blocks_to() {
        let mut email = draft();
        email.add_bcc("alreadybcc@examplecorp.com").unwrap();
        email.add_recipient("alreadybcc@examplecorp.com").unwrap();

        assert_eq!(email.recipients().len(), 0);
        assert_eq!(email.bcc().len(), 1);
    }

    #[test]
    fn test_partition_is_mutual() {
        let mut email = draft();
        email.add_recipient("a@example.com").unwrap();
        email.add_cc("a@example.com").unwrap();
        email.add_bcc("a@example.com").unwrap();

        assert_eq!(email.recipients().len(), 1);
        assert!(email.cc().is_empty());
        assert!(email.bcc().is_empty());

        email.add_cc("b@example.com").unwrap();
        email.add_bcc("b@example.com").unwrap();
        assert_eq!(email.cc().len(), 1);
        assert!(email.bcc().is_empty());
    }

    #[test]
    fn test_invalid_address_not_inserted_anywhere() {
        let mut email = draft();
        let err = email.add_recipient("test@ohmygod......what").unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidAddress {
                scope: Scope::To,
                ..
            }
        ));
        assert!(email.recipients().is_empty());
        assert!(email.cc().is_empty());
        assert!(email.bcc().is_empty());
    }

    #[test]
    fn test_custom_author_validator() {
        let mut email = draft();
        email
            .set_validator(|addr: &str| addr.ends_with("@examplecorp.com"), &["author"])
            .unwrap();

        let err = email
            .login_with(MockTransport::default(), "spy@rivalcorp.com")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAddress {
                scope: Scope::Author,
                ..
            }
        ));

        email
            .login_with(MockTransport::default(), "boss@examplecorp.com")
            .unwrap();
        assert_eq!(email.sender(), Some("boss@examplecorp.com"));
    }

    #[test]
    fn test_unknown_validator_scope() {
        let mut email = draft();
        let err = email
            .set_validator(|_: &str| true, &["recipients"])
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_sender_assigned_once() {
        let mut email = draft();
        email
            .login_with(MockTransport::default(), "user@example.com")
            .unwrap();
        let err = email
            .login_with(MockTransport::default(), "other@example.com")
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyLoggedIn));
        assert_eq!(email.sender(), Some("user@example.com"));
    }

    #[test]
    fn test_send_without_login() {
        let mut email = draft();
        email.add_recipient("a@example.com").unwrap();
        let err = email.send().unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_send_rejects_cc_only_drafts() {
        let mut email = draft();
        email
            .login_with(MockTransport::default(), "user@example.com")
            .unwrap();
        email.add_cc("copy@example.com").unwrap();
        email.add_bcc("blind@example.com").unwrap();

        let err = email.send().unwrap_err();
        assert!(matches!(err, Error::EmptyRecipients));
    }

    #[test]
    fn test_send_hands_off_envelope_union() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let transport = MockTransport {
            sent: Arc::clone(&sent),
            refusals: DeliveryFailures::new(),
        };

        let mut email = draft();
        email.login_with(transport, "user@example.com").unwrap();
        email.add_recipient("to@example.com").unwrap();
        email.add_cc("cc@example.com").unwrap();
        email.add_bcc("bcc@example.com").unwrap();
        email.set_subject("Hello").set_body("plain words");

        email.send().unwrap();

        let log = sent.lock().unwrap();
        let (from, envelope, wire) = &log[0];
        assert_eq!(from, "user@example.com");
        assert_eq!(
            envelope,
            &vec![
                "bcc@example.com".to_string(),
                "cc@example.com".to_string(),
                "to@example.com".to_string(),
            ]
        );
        assert!(wire.contains("Subject: Hello\r\n"));
        assert!(wire.contains("Cc: cc@example.com\r\n"));
    }

    #[test]
    fn test_send_surfaces_one_refusal() {
        let mut refusals = DeliveryFailures::new();
        refusals.insert(
            "gone@example.com".to_string(),
            (550, "no such user".to_string()),
        );
        let transport = MockTransport {
            sent: Arc::default(),
            refusals,
        };

        let mut email = draft();
        email.login_with(transport, "user@example.com").unwrap();
        email.add_recipient("gone@example.com").unwrap();

        let err = email.send().unwrap_err();
        match err {
            Error::Send {
                address,
                code,
                reason,
            } => {
                assert_eq!(address, "gone@example.com");
                assert_eq!(code, 550);
                assert_eq!(reason, "no such user");
            }
            other => panic!("expected Send error, got {other:?}"),
        }
    }

    #[test]
    fn test_body_classification() {
        let mut email = draft();
        email.set_body("just words");
        assert_eq!(email.body_kind(), BodyKind::Plain);

        email.set_body("<p>markup</p>");
        assert_eq!(email.body_kind(), BodyKind::Html);
    }

    #[test]
    fn test_plain_body_rejects_markup() {
        let mut email = draft();
        let err = email
            .set_body_as("<b>loud</b>", BodyKind::Plain)
            .unwrap_err();
        assert!(matches!(err, Error::Body(_)));
    }

    #[test]
    fn test_html_body_without_markup_gets_styled() {
        let mut email = draft();
        email.set_body_as("quiet words", BodyKind::Html).unwrap();
        assert!(email.body().starts_with("<div style="));
        assert_eq!(email.body_kind(), BodyKind::Html);
    }

    #[test]
    fn test_body_from_file() {
        let path = temp_file(b"from a file");
        let mut email = draft();
        email.set_body_from_file(&path, BodyKind::Plain).unwrap();
        assert_eq!(email.body(), "from a file");

        let err = email
            .set_body_from_file("/definitely/not/here.txt", BodyKind::Plain)
            .unwrap_err();
        assert!(matches!(err, Error::Body(_)));
    }

    #[test]
    fn test_custom_classifier() {
        let mut email = draft();
        email.set_html_classifier(|text: &str| text.contains("MARKUP"));
        email.set_body("<p>not detected by this classifier</p>");
        assert_eq!(email.body_kind(), BodyKind::Plain);

        email.set_body("MARKUP");
        assert_eq!(email.body_kind(), BodyKind::Html);
    }

    #[test]
    fn test_send_keeps_draft_open_for_chaining() {
        let mut email = draft();
        email
            .login_with(MockTransport::default(), "user@example.com")
            .unwrap();
        email.add_recipient("to@example.com").unwrap();

        email.send().unwrap().set_subject("second pass");
        assert_eq!(email.subject(), "second pass");
    }
}
