use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{ProviderConfig, GMAIL_SMTP_HOST};
use super::resend::ResendTransport;
use super::smtp::SmtpTransport;
use crate::error::MailError;
use crate::models::RenderedMessage;

/// One outbound email transport.
///
/// `deliver` is a single attempt carrying every recipient; it returns the
/// provider's message id.
#[async_trait]
pub trait MailTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(
        &self,
        message: &RenderedMessage,
        recipients: &[String],
    ) -> Result<String, MailError>;
}

/// Build the transport for a resolved provider. `None` has no transport.
pub fn for_provider(
    provider: &ProviderConfig,
    from: &str,
) -> Result<Option<Arc<dyn MailTransport>>, MailError> {
    let transport: Arc<dyn MailTransport> = match provider {
        ProviderConfig::None => return Ok(None),
        ProviderConfig::DirectAccount { user, app_password } => Arc::new(SmtpTransport::relay(
            GMAIL_SMTP_HOST,
            465,
            user,
            app_password,
            from,
        )?),
        ProviderConfig::HostedApi { api_key, base_url } => {
            Arc::new(ResendTransport::new(api_key, base_url, from))
        }
        ProviderConfig::GenericSmtp {
            host,
            port,
            username,
            password,
        } => Arc::new(SmtpTransport::relay(host, *port, username, password, from)?),
    };

    Ok(Some(transport))
}
