use std::time::Duration;

use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::configuration::SmtpSettings;
use crate::domain::EmailAddress;

/// A message for the site owner. Sender and recipient are fixed by the
/// transport, only the visitor's address travels as `Reply-To`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub reply_to: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_email(&self, email: OutgoingEmail) -> Result<(), anyhow::Error>;
}

pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
    timeout: Duration,
}

impl SmtpEmailClient {
    pub fn new(settings: &SmtpSettings) -> Result<Self, anyhow::Error> {
        // The relay host presents a self-signed certificate.
        let tls = TlsParameters::builder(settings.host.clone())
            .dangerous_accept_invalid_certs(true)
            .build()
            .context("Failed to build SMTP TLS parameters")?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().clone(),
            ))
            .tls(Tls::Opportunistic(tls))
            .build();

        Ok(Self {
            transport,
            sender: settings.sender()?,
            recipient: settings.recipient()?,
            timeout: settings.timeout(),
        })
    }

    fn build_message(&self, email: OutgoingEmail) -> Result<Message, anyhow::Error> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(email.subject);

        match email.reply_to.as_ref().parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!(
                error.cause_chain = ?e,
                reply_to = %email.reply_to,
                "Visitor address is not a valid mailbox, sending without Reply-To"
            ),
        }

        builder
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))
            .context("Failed to assemble the email message")
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpEmailClient {
    #[tracing::instrument(
        name = "Send email over SMTP",
        skip_all,
        fields(subject = %email.subject)
    )]
    async fn send_email(&self, email: OutgoingEmail) -> Result<(), anyhow::Error> {
        let message = self.build_message(email)?;
        // Covers connect, greeting, STARTTLS and DATA as a whole.
        tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .with_context(|| format!("SMTP server did not answer within {:?}", self.timeout))?
            .context("SMTP server refused or failed to accept the message")?;
        Ok(())
    }
}
