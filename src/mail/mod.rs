pub mod provider;
pub mod resend;
pub mod smtp;
pub mod transport;

use std::sync::Arc;

use chrono::Utc;

pub use provider::{ProviderConfig, ProviderKind, ProviderResolver};
pub use transport::MailTransport;

use crate::config::MailSettings;
use crate::error::MailError;
use crate::models::{
    AlertPayload, DigestPayload, DispatchOutcome, Notification, NotificationRequest,
    RenderedMessage, TestPayload, WelcomePayload,
};
use crate::templates::TemplateRenderer;

pub const DEFAULT_FROM: &str = "RuralConnect <onboarding@resend.dev>";

/// Email dispatcher.
///
/// Each send is one attempt against the resolved provider. Without a
/// provider the message is logged instead (development mode) and reported
/// as delivered.
#[derive(Clone)]
pub struct Mailer {
    provider: ProviderConfig,
    transport: Option<Arc<dyn MailTransport>>,
    from: String,
    renderer: TemplateRenderer,
}

impl Mailer {
    pub fn new(
        provider: ProviderConfig,
        from: String,
        renderer: TemplateRenderer,
    ) -> Result<Self, MailError> {
        let transport = transport::for_provider(&provider, &from)?;
        Ok(Self {
            provider,
            transport,
            from,
            renderer,
        })
    }

    /// Resolve the provider from settings and build the matching transport.
    pub fn from_resolver(
        resolver: &ProviderResolver,
        renderer: TemplateRenderer,
    ) -> Result<Self, MailError> {
        let provider = resolver.resolve().clone();
        let from = sender_address(resolver.settings(), &provider);
        Self::new(provider, from, renderer)
    }

    /// Use an already-built transport
    pub fn with_transport(
        provider: ProviderConfig,
        from: String,
        renderer: TemplateRenderer,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            provider,
            transport: Some(transport),
            from,
            renderer,
        }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub async fn send(&self, message: &RenderedMessage, recipients: &[String]) -> DispatchOutcome {
        if recipients.is_empty() {
            return DispatchOutcome::failed("No recipients specified");
        }

        if matches!(self.provider, ProviderConfig::None) {
            return self.log_only(message, recipients);
        }
        let Some(transport) = &self.transport else {
            tracing::warn!(
                provider = %self.provider.kind(),
                subject = %message.subject,
                "Configured provider has no transport"
            );
            return DispatchOutcome::failed(format!(
                "No transport available for provider {}",
                self.provider.kind()
            ));
        };

        match transport.deliver(message, recipients).await {
            Ok(message_id) => {
                tracing::info!(
                    provider = transport.name(),
                    message_id = %message_id,
                    recipients = recipients.len(),
                    subject = %message.subject,
                    "Email sent"
                );
                DispatchOutcome::delivered(message_id)
            }
            Err(e) => {
                tracing::warn!(
                    provider = transport.name(),
                    recipients = recipients.len(),
                    subject = %message.subject,
                    error = %e,
                    "Email dispatch failed"
                );
                DispatchOutcome::failed(e.to_string())
            }
        }
    }

    fn log_only(&self, message: &RenderedMessage, recipients: &[String]) -> DispatchOutcome {
        tracing::info!(
            from = %self.from,
            to = ?recipients,
            subject = %message.subject,
            body = %message.text,
            "No email provider configured; message logged instead of sent"
        );
        DispatchOutcome::delivered(format!("dev_{}", Utc::now().timestamp_millis()))
    }

    pub async fn notify(&self, request: &NotificationRequest) -> DispatchOutcome {
        let message = match self.renderer.render(&request.notification) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(
                    kind = ?request.notification.kind(),
                    error = %e,
                    "Email rendering failed"
                );
                return DispatchOutcome::failed(e.to_string());
            }
        };
        self.send(&message, &request.recipients).await
    }

    /// Registration welcome email
    pub async fn send_welcome(&self, payload: WelcomePayload) -> DispatchOutcome {
        let recipients = vec![payload.email.clone()];
        self.notify(&NotificationRequest {
            recipients,
            notification: Notification::Welcome(payload),
        })
        .await
    }

    /// Connectivity check from the email diagnostics page
    pub async fn send_test(&self, to: &str) -> DispatchOutcome {
        self.notify(&NotificationRequest {
            recipients: vec![to.to_string()],
            notification: Notification::Test(TestPayload {
                email: to.to_string(),
            }),
        })
        .await
    }

    /// Emergency alert broadcast, one provider call for all recipients
    pub async fn send_alert(&self, recipients: Vec<String>, payload: AlertPayload) -> DispatchOutcome {
        self.notify(&NotificationRequest {
            recipients,
            notification: Notification::EmergencyAlert(payload),
        })
        .await
    }

    pub async fn send_digest(&self, to: &str, payload: DigestPayload) -> DispatchOutcome {
        self.notify(&NotificationRequest {
            recipients: vec![to.to_string()],
            notification: Notification::Digest(payload),
        })
        .await
    }
}

/// `MAIL_FROM` if set; a direct account must send as itself otherwise.
pub fn sender_address(settings: &MailSettings, provider: &ProviderConfig) -> String {
    if let Some(from) = &settings.from {
        return from.clone();
    }
    match provider {
        ProviderConfig::DirectAccount { user, .. } => user.clone(),
        _ => DEFAULT_FROM.to_string(),
    }
}
