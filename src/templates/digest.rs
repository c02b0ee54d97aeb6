use serde::Serialize;
use tera::Context;

use super::{present, TemplateParams, TemplateRenderer};
use crate::models::DigestPayload;

const ACCENT: &str = "#6b4f2c";

#[derive(Serialize)]
struct Counter {
    label: &'static str,
    count: u64,
}

pub(super) fn params(renderer: &TemplateRenderer, p: &DigestPayload) -> TemplateParams {
    let greeting = match present(&p.first_name) {
        Some(name) => format!("Hi {name},"),
        None => "Hi neighbour,".to_string(),
    };
    let counters = [
        Counter { label: "New posts", count: p.new_posts },
        Counter { label: "Help requests", count: p.help_requests },
        Counter { label: "Equipment shares", count: p.equipment_shares },
        Counter { label: "Weather alerts", count: p.weather_alerts },
    ];

    let mut context = Context::new();
    context.insert("heading", "Community digest");
    context.insert("accent", ACCENT);
    context.insert("greeting", &greeting);
    context.insert("period", present(&p.period).unwrap_or("recently"));
    context.insert("counters", &counters);
    context.insert("feed_url", &format!("{}/feed", renderer.app_url()));

    let subject = format!("Your {} community digest", renderer.app_name());

    ("digest", subject, context)
}
