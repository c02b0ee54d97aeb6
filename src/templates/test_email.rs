use tera::Context;

use super::{TemplateParams, TemplateRenderer};
use crate::models::TestPayload;

const ACCENT: &str = "#2b6cb0";

pub(super) fn params(renderer: &TemplateRenderer, p: &TestPayload) -> TemplateParams {
    let mut context = Context::new();
    context.insert("heading", "Email delivery test");
    context.insert("accent", ACCENT);
    context.insert("email", p.email.trim());

    let subject = format!("{} email configuration test", renderer.app_name());

    ("test_email", subject, context)
}

#[cfg(test)]
mod tests {
    use crate::models::{Notification, TestPayload};
    use crate::templates::TemplateRenderer;

    #[test]
    fn test_body_names_recipient_only() {
        let message = TemplateRenderer::new("RuralConnect", "http://localhost:3000")
            .expect("Should load templates")
            .render(&Notification::Test(TestPayload {
                email: "ops@example.com".to_string(),
            }))
            .expect("Should render");

        assert_eq!(message.subject, "RuralConnect email configuration test");
        assert!(message.html.contains("<strong>ops@example.com</strong>"));
        assert!(message.text.contains("messages can reach ops@example.com."));
    }
}
