use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transport::MailTransport;
use crate::error::MailError;
use crate::models::RenderedMessage;

/// Resend hosted email API
#[derive(Clone)]
pub struct ResendTransport {
    client: Client,
    api_key: String,
    endpoint: String,
    from: String,
}

impl ResendTransport {
    pub fn new(api_key: &str, base_url: &str, from: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            from: from.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

#[async_trait]
impl MailTransport for ResendTransport {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn deliver(
        &self,
        message: &RenderedMessage,
        recipients: &[String],
    ) -> Result<String, MailError> {
        let payload = Payload {
            from: &self.from,
            to: recipients,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MailError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        // Accepted; a missing or unreadable id still counts as sent.
        let body = res.text().await.unwrap_or_default();
        let id = serde_json::from_str::<SendResponse>(&body)
            .ok()
            .map(|sent| sent.id)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!(body = %body, "Provider accepted message without an id");
                format!("resend_{}", Uuid::new_v4())
            });
        Ok(id)
    }
}
