//! SMTP notifier via lettre: STARTTLS, authenticated submission, one envelope.

use std::collections::BTreeSet;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;

use crate::config::SmtpConfig;
use crate::error::DeliveryError;
use crate::notify::Notifier;

/// Sends the reminder through an SMTP relay.
pub struct SmtpNotifier {
    sender: Mailbox,
    transport: SmtpTransport,
    host: String,
}

impl SmtpNotifier {
    /// Build the notifier. Fails on an unparseable sender address or relay host.
    pub fn new(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        let sender = parse_mailbox("sender", &config.sender)?;

        let creds = Credentials::new(
            config.sender.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| DeliveryError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(creds)
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            sender,
            transport,
            host: config.host.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn deliver(
        &self,
        recipients: &BTreeSet<String>,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), DeliveryError> {
        let email = build_message(&self.sender, recipients, subject, text, html)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| DeliveryError::TaskFailed(e.to_string()))?
            .map_err(|e| DeliveryError::Transport(format!("SMTP send failed: {e}")))?;

        tracing::info!(host = %self.host, recipients = recipients.len(), "Reminder email sent");
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn parse_mailbox(role: &'static str, address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
            role,
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build one `multipart/alternative` message addressed to all recipients.
pub fn build_message(
    sender: &Mailbox,
    recipients: &BTreeSet<String>,
    subject: &str,
    text: &str,
    html: &str,
) -> Result<Message, DeliveryError> {
    if recipients.is_empty() {
        return Err(DeliveryError::NoRecipients);
    }

    let mut builder = Message::builder().from(sender.clone()).subject(subject);
    for recipient in recipients {
        builder = builder.to(parse_mailbox("recipient", recipient)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            text.to_string(),
            html.to_string(),
        ))
        .map_err(|e| DeliveryError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    fn recipients(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sender() -> Mailbox {
        "security@example.com".parse().unwrap()
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8(message.formatted()).unwrap()
    }

    #[test]
    fn message_addresses_all_recipients_once() {
        let message = build_message(
            &sender(),
            &recipients(&["a@x.com", "b@x.com"]),
            "Subject line",
            "plain body",
            "<p>html body</p>",
        )
        .unwrap();

        let envelope = message.envelope();
        let to: Vec<String> = envelope.to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, ["a@x.com", "b@x.com"]);
        assert_eq!(
            envelope.from().map(|a| a.to_string()).as_deref(),
            Some("security@example.com")
        );
    }

    #[test]
    fn message_is_multipart_alternative_with_both_bodies() {
        let message = build_message(
            &sender(),
            &recipients(&["a@x.com"]),
            "Subject line",
            "plain body",
            "<p>html body</p>",
        )
        .unwrap();
        let raw = formatted(&message);

        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("plain body"));
        assert!(raw.contains("<p>html body</p>"));
        assert!(raw.find("text/plain").unwrap() < raw.find("text/html").unwrap());
    }

    #[test]
    fn empty_recipients_fail_loudly() {
        let err = build_message(&sender(), &BTreeSet::new(), "s", "t", "h").unwrap_err();
        assert!(matches!(err, DeliveryError::NoRecipients));
    }

    #[test]
    fn malformed_recipient_is_delivery_error() {
        let err = build_message(&sender(), &recipients(&["not an email"]), "s", "t", "h")
            .unwrap_err();
        assert!(matches!(
            err,
            DeliveryError::InvalidAddress { role: "recipient", .. }
        ));
    }

    #[test]
    fn notifier_rejects_bad_sender() {
        let config = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            sender: "nobody".into(),
            password: SecretString::from("pw"),
            timeout: Duration::from_secs(5),
        };
        assert!(matches!(
            SmtpNotifier::new(&config),
            Err(DeliveryError::InvalidAddress { role: "sender", .. })
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let _ = rustls::crypto::ring::default_provider().install_default();

        // Bind then drop to get a local port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = SmtpConfig {
            host: "127.0.0.1".into(),
            port,
            sender: "security@example.com".into(),
            password: SecretString::from("pw"),
            timeout: Duration::from_secs(5),
        };
        let notifier = SmtpNotifier::new(&config).unwrap();

        let err = notifier
            .deliver(&recipients(&["a@x.com"]), "s", "t", "<p>h</p>")
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)), "{err:?}");
    }
}
