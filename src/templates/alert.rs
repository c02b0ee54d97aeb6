use tera::Context;

use super::{present, TemplateParams, TemplateRenderer};
use crate::models::{AlertPayload, AlertSeverity};

fn severity_colour(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Low => "#2f855a",
        AlertSeverity::Medium => "#b7791f",
        AlertSeverity::High => "#c05621",
        AlertSeverity::Critical => "#c53030",
    }
}

pub(super) fn params(renderer: &TemplateRenderer, p: &AlertPayload) -> TemplateParams {
    let severity = p.severity.label();
    let title = p.title.trim();

    let mut context = Context::new();
    context.insert("heading", "Emergency Alert");
    context.insert("accent", severity_colour(p.severity));
    context.insert("severity", severity);
    context.insert("title", title);
    context.insert("message", p.message.trim());
    context.insert("location", &present(&p.location));
    context.insert("issued_by", &present(&p.issued_by));
    context.insert("alerts_url", &format!("{}/alerts", renderer.app_url()));

    let subject = format!("[EMERGENCY ALERT] {severity}: {title}");

    ("emergency_alert", subject, context)
}
