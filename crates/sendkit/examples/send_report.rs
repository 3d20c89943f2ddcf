//! Sends a small status report through a real relay.
//!
//! Relay coordinates and credentials come from the environment:
//! `SENDKIT_HOST`, `SENDKIT_PORT`, `SENDKIT_USER`, `SENDKIT_PASSWORD`,
//! `SENDKIT_TO`. Without `SENDKIT_HOST` the example exits quietly.

use sendkit::{Email, TlsMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(host) = std::env::var("SENDKIT_HOST") else {
        eprintln!("SENDKIT_HOST not set; nothing to do");
        return Ok(());
    };
    let port: u16 = std::env::var("SENDKIT_PORT")?.parse()?;
    let user = std::env::var("SENDKIT_USER")?;
    let password = std::env::var("SENDKIT_PASSWORD")?;
    let to = std::env::var("SENDKIT_TO")?;

    let mut email = Email::new(host, port);
    email.login(&user, &password, TlsMode::StartTls)?;

    email
        .set_subject("sendkit status report")
        .set_body("<h1>All green</h1><p>No failures in tonight's run.</p>");
    email.add_recipient(&to)?;

    email.send()?;
    email.logout()?;

    println!("report sent to {to}");
    Ok(())
}
