//! SMTP transport (lettre), used for both the direct Gmail account and
//! generic SMTP settings.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use super::transport::MailTransport;
use crate::error::MailError;
use crate::models::RenderedMessage;

/// How the connection is secured, chosen from the relay port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS from the first byte (SMTPS, port 465)
    Implicit,
    /// Plain connection upgraded with STARTTLS
    StartTls,
}

impl SmtpSecurity {
    pub fn for_port(port: u16) -> Self {
        if port == 465 {
            SmtpSecurity::Implicit
        } else {
            SmtpSecurity::StartTls
        }
    }
}

pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpTransport {
    /// Authenticated relay, secured per [`SmtpSecurity::for_port`].
    pub fn relay(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from: &str,
    ) -> Result<Self, MailError> {
        let builder = match SmtpSecurity::for_port(port) {
            SmtpSecurity::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
        }
        .map_err(|e| MailError::InvalidConfiguration(format!("SMTP relay {host}: {e}")))?;

        let transport = builder
            .port(port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        let from = from
            .parse()
            .map_err(|e| MailError::InvalidConfiguration(format!("Invalid from address: {e}")))?;

        Ok(Self { transport, from })
    }

    fn build_message(
        &self,
        message: &RenderedMessage,
        recipients: &[String],
    ) -> Result<(String, Message), MailError> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain());

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(&message.subject)
            .message_id(Some(message_id.clone()));

        for address in recipients {
            let mailbox: Mailbox = address.parse().map_err(|e| MailError::InvalidAddress {
                address: address.clone(),
                reason: format!("{e}"),
            })?;
            builder = builder.to(mailbox);
        }

        let email = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(message.text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(message.html.clone()),
                ),
        )?;

        Ok((message_id, email))
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(
        &self,
        message: &RenderedMessage,
        recipients: &[String],
    ) -> Result<String, MailError> {
        let (message_id, email) = self.build_message(message, recipients)?;
        self.transport.send(email).await?;
        Ok(message_id)
    }
}
