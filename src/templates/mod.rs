//! HTML and plain-text email templates.
//!
//! Templates live under `templates/notifications/` and are embedded with
//! `include_str!`. `.html` templates are autoescaped by tera; `.txt` are not.
//! Optional fields that are absent (or blank) drop their whole line.

mod alert;
mod digest;
mod test_email;
mod welcome;

use tera::{Context, Tera};

use crate::error::MailError;
use crate::models::{Notification, RenderedMessage};

#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    engine: Tera,
    app_name: String,
    app_url: String,
}

impl TemplateRenderer {
    pub fn new(
        app_name: impl Into<String>,
        app_url: impl Into<String>,
    ) -> Result<Self, MailError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "layout.html",
                    include_str!("../../templates/notifications/layout.html"),
                ),
                (
                    "welcome.html",
                    include_str!("../../templates/notifications/welcome.html"),
                ),
                (
                    "welcome.txt",
                    include_str!("../../templates/notifications/welcome.txt"),
                ),
                (
                    "test_email.html",
                    include_str!("../../templates/notifications/test_email.html"),
                ),
                (
                    "test_email.txt",
                    include_str!("../../templates/notifications/test_email.txt"),
                ),
                (
                    "emergency_alert.html",
                    include_str!("../../templates/notifications/emergency_alert.html"),
                ),
                (
                    "emergency_alert.txt",
                    include_str!("../../templates/notifications/emergency_alert.txt"),
                ),
                (
                    "digest.html",
                    include_str!("../../templates/notifications/digest.html"),
                ),
                (
                    "digest.txt",
                    include_str!("../../templates/notifications/digest.txt"),
                ),
            ])
            .map_err(|e| MailError::Template(e.to_string()))?;

        Ok(Self {
            engine,
            app_name: app_name.into(),
            app_url: app_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn render(&self, notification: &Notification) -> Result<RenderedMessage, MailError> {
        let (template_name, subject, mut context) = match notification {
            Notification::Welcome(p) => welcome::params(self, p),
            Notification::Test(p) => test_email::params(self, p),
            Notification::EmergencyAlert(p) => alert::params(self, p),
            Notification::Digest(p) => digest::params(self, p),
        };
        context.insert("app_name", &self.app_name);

        let html = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| MailError::Template(e.to_string()))?;

        let text = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| MailError::Template(e.to_string()))?;

        Ok(RenderedMessage {
            subject,
            html,
            text,
        })
    }
}

/// Template name, subject and context for one notification kind
pub(crate) type TemplateParams = (&'static str, String, Context);

/// Trimmed value of an optional field, `None` when absent or blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
