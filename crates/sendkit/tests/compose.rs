//! End-to-end composition tests against a recording transport.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use sendkit::transport::{DeliveryFailures, Transport};
use sendkit::{BodyKind, Email, EmailConfig, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

type SentMessage = (String, Vec<String>, String);

/// Records every handoff so tests can inspect the composed wire message.
#[derive(Default)]
struct RecordingTransport {
    log: Arc<Mutex<Vec<SentMessage>>>,
    closed: Arc<Mutex<bool>>,
}

impl Transport for RecordingTransport {
    fn send_message(
        &mut self,
        from: &str,
        recipients: &[String],
        message: &str,
    ) -> Result<DeliveryFailures> {
        self.log.lock().unwrap().push((
            from.to_string(),
            recipients.to_vec(),
            message.to_string(),
        ));
        Ok(DeliveryFailures::new())
    }

    fn close(&mut self) -> Result<()> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    static SEQ: AtomicU32 = AtomicU32::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("sendkit-it-{}-{seq}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn composed_message_carries_headers_body_and_attachment() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport {
        log: Arc::clone(&log),
        closed: Arc::default(),
    };

    let report = temp_file("report.csv", b"day,errors\nmon,0\n");

    let mut email = Email::new("smtp.example.com", 587);
    email.login_with(transport, "bot@example.com").unwrap();
    email
        .set_subject("Nightly report")
        .set_body("<h1>All green</h1>");
    email.add_recipient("team@example.com").unwrap();
    email.add_cc("manager@example.com").unwrap();
    email.add_attachment(&report).unwrap();
    email.send().unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    let (from, envelope, wire) = &log[0];

    assert_eq!(from, "bot@example.com");
    assert_eq!(
        envelope,
        &vec![
            "manager@example.com".to_string(),
            "team@example.com".to_string()
        ]
    );

    assert!(wire.contains("Subject: Nightly report\r\n"));
    assert!(wire.contains("From: bot@example.com\r\n"));
    assert!(wire.contains("Cc: manager@example.com\r\n"));
    assert!(wire.contains("Date: "));
    assert!(wire.contains("MIME-Version: 1.0\r\n"));
    // The classifier saw markup, so the body travels as text/html
    assert!(wire.contains("Content-Type: text/html; charset=utf-8\r\n"));
    assert!(wire.contains("<h1>All green</h1>"));
    assert!(wire.contains("Content-Disposition: attachment; filename=report.csv\r\n"));
    assert!(wire.contains("Content-Transfer-Encoding: base64\r\n"));
}

#[test]
fn cc_header_is_present_even_when_empty() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport {
        log: Arc::clone(&log),
        closed: Arc::default(),
    };

    let mut email = Email::new("smtp.example.com", 587);
    email.login_with(transport, "bot@example.com").unwrap();
    email.add_recipient("team@example.com").unwrap();
    email.send().unwrap();

    let log = log.lock().unwrap();
    let (_, _, wire) = &log[0];
    assert!(wire.contains("Cc: \r\n"));
}

#[test]
fn plain_body_travels_as_text_plain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport {
        log: Arc::clone(&log),
        closed: Arc::default(),
    };

    let mut email = Email::new("smtp.example.com", 587);
    email.login_with(transport, "bot@example.com").unwrap();
    email.add_recipient("team@example.com").unwrap();
    email
        .set_body_as("status: fine", BodyKind::Plain)
        .unwrap();
    email.send().unwrap();

    let log = log.lock().unwrap();
    let (_, _, wire) = &log[0];
    assert!(wire.contains("Content-Type: text/plain; charset=utf-8\r\n"));
    assert!(wire.contains("status: fine"));
}

#[test]
fn logout_closes_the_transport() {
    let closed = Arc::new(Mutex::new(false));
    let transport = RecordingTransport {
        log: Arc::default(),
        closed: Arc::clone(&closed),
    };

    let mut email = Email::new("smtp.example.com", 587);
    email.login_with(transport, "bot@example.com").unwrap();
    email.logout().unwrap();

    assert!(*closed.lock().unwrap());
}

#[test]
fn budget_tracks_multiple_files() {
    let a = temp_file("a.bin", &[1_u8; 40]);
    let b = temp_file("b.bin", &[2_u8; 40]);
    let c = temp_file("c.bin", &[3_u8; 40]);

    let mut email =
        Email::with_config(EmailConfig::new("smtp.example.com", 587).with_size_limit(100));
    email.add_attachment(&a).unwrap();
    email.add_attachment(&b).unwrap();
    assert_eq!(email.remaining_budget(), 20);

    assert!(email.add_attachment(&c).is_err());
    assert_eq!(email.remaining_budget(), 20);
    assert_eq!(email.attachments().len(), 2);
}

proptest! {
    /// Any sequence of validated adds keeps the three scopes disjoint.
    #[test]
    fn prop_scopes_stay_disjoint(
        ops in proptest::collection::vec(
            (0..3_u8, "[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{2,3}"),
            0..40,
        )
    ) {
        let mut email = Email::new("smtp.example.com", 587);
        for (scope, address) in &ops {
            let result = match scope {
                0 => email.add_recipient(address),
                1 => email.add_cc(address),
                _ => email.add_bcc(address),
            };
            prop_assert!(result.is_ok());
        }

        for address in email.recipients() {
            prop_assert!(!email.cc().contains(address));
            prop_assert!(!email.bcc().contains(address));
        }
        for address in email.cc() {
            prop_assert!(!email.bcc().contains(address));
        }
    }
}
