use tera::Context;

use super::{present, TemplateParams, TemplateRenderer};
use crate::models::WelcomePayload;

const ACCENT: &str = "#3d7a3a";

pub(super) fn params(renderer: &TemplateRenderer, p: &WelcomePayload) -> TemplateParams {
    let first_name = p.first_name.trim();
    let full_name = match present(&p.last_name) {
        Some(last) => format!("{first_name} {last}"),
        None => first_name.to_string(),
    };

    let mut context = Context::new();
    context.insert("heading", &format!("Welcome to {}", renderer.app_name()));
    context.insert("accent", ACCENT);
    context.insert("first_name", first_name);
    context.insert("full_name", &full_name);
    context.insert("email", p.email.trim());
    context.insert("location", &present(&p.location));
    context.insert("state", &present(&p.state));
    context.insert("property_type", &present(&p.property_type));
    context.insert("dashboard_url", &format!("{}/dashboard", renderer.app_url()));

    let subject = format!("Welcome to {}, {}!", renderer.app_name(), first_name);

    ("welcome", subject, context)
}

#[cfg(test)]
mod tests {
    use crate::models::{Notification, RenderedMessage, WelcomePayload};
    use crate::templates::TemplateRenderer;

    fn render(payload: WelcomePayload) -> RenderedMessage {
        TemplateRenderer::new("RuralConnect", "http://localhost:3000")
            .expect("Should load templates")
            .render(&Notification::Welcome(payload))
            .expect("Should render")
    }

    #[test]
    fn test_blank_location_line_is_omitted() {
        let message = render(WelcomePayload {
            first_name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            location: Some(String::new()),
            property_type: Some("Cattle".to_string()),
            ..Default::default()
        });

        assert!(message.html.contains("Pat"));
        assert!(message.html.contains("Cattle"));
        assert!(!message.html.contains("Location:"));
        assert!(!message.text.contains("Location:"));
        assert!(!message.html.contains("State:"));
        assert!(message.text.contains("- Property Type: Cattle\n\nGetting started"));
    }

    #[test]
    fn test_all_fields_present() {
        let message = render(WelcomePayload {
            first_name: "Jo".to_string(),
            last_name: Some("Begay".to_string()),
            email: "jo@example.com".to_string(),
            location: Some("Chinle".to_string()),
            state: Some("AZ".to_string()),
            property_type: Some("Sheep".to_string()),
        });

        assert_eq!(message.subject, "Welcome to RuralConnect, Jo!");
        for line in ["Name:</strong> Jo Begay", "Location:</strong> Chinle", "State:</strong> AZ"] {
            assert!(message.html.contains(line), "missing {line}");
        }
        for line in ["- Name: Jo Begay", "- Location: Chinle", "- Property Type: Sheep"] {
            assert!(message.text.contains(line), "missing {line}");
        }
        assert!(message.html.contains(r#"href="http://localhost:3000/dashboard""#));
        assert!(message.text.contains("Go to your dashboard: http://localhost:3000/dashboard"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let message = render(WelcomePayload {
            first_name: "<script>".to_string(),
            email: "x@example.com".to_string(),
            ..Default::default()
        });

        assert!(!message.html.contains("<script>"));
        assert!(message.html.contains("&lt;script&gt;"));
    }
}
