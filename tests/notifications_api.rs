use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ruralconnect_backend::api::create_router;
use ruralconnect_backend::config::{Config, MailSettings};
use ruralconnect_backend::mail::{Mailer, ProviderResolver};
use ruralconnect_backend::state::AppState;
use ruralconnect_backend::templates::TemplateRenderer;

fn config(mail: MailSettings) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        app_name: "RuralConnect".to_string(),
        app_url: "http://localhost:3000".to_string(),
        mail,
    }
}

fn app(mail: MailSettings) -> Router {
    let config = config(mail);
    let resolver = ProviderResolver::new(config.mail.clone());
    let renderer = TemplateRenderer::new(config.app_name.clone(), config.app_url.clone())
        .expect("Should load templates");
    let mailer = Mailer::from_resolver(&resolver, renderer).expect("Should build mailer");
    create_router(AppState::new(config, mailer))
}

fn resend(server: &MockServer) -> MailSettings {
    MailSettings {
        resend_api_key: Some("re_test".to_string()),
        resend_api_url: Some(server.uri()),
        ..Default::default()
    }
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    call(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    call(app, request).await
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_email_without_provider_is_logged_and_succeeds() {
    let (status, body) = post(
        app(MailSettings::default()),
        "/api/v1/notifications/test",
        json!({ "email": "ops@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["provider_message_id"]
        .as_str()
        .is_some_and(|id| id.starts_with("dev_")));
}

#[tokio::test]
async fn test_alert_rejected_by_provider_reports_one_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "You can only send testing emails to your own address",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post(
        app(resend(&server)),
        "/api/v1/notifications/alert",
        json!({
            "recipients": ["a@example.com", "b@example.com", "c@example.com"],
            "title": "Wildfire evacuation",
            "severity": "critical",
            "message": "Leave via Highway 2.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert!(body["error_detail"]
        .as_str()
        .is_some_and(|d| d.contains("You can only send testing emails to your own address")));
}

#[tokio::test]
async fn test_welcome_is_sent_through_hosted_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post(
        app(resend(&server)),
        "/api/v1/notifications/welcome",
        json!({
            "email": "pat@example.com",
            "first_name": "Pat",
            "location": "",
            "property_type": "Cattle",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "provider_message_id": "email_abc" }));

    let requests = server.received_requests().await.expect("recording enabled");
    let sent: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    let html = sent["html"].as_str().expect("html");
    assert!(html.contains("Pat"));
    assert!(html.contains("Cattle"));
    assert!(!html.contains("Location:"));
    assert_eq!(sent["to"], json!(["pat@example.com"]));
}

#[tokio::test]
async fn test_digest_counts_reach_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_digest" })))
        .mount(&server)
        .await;

    let (_, body) = post(
        app(resend(&server)),
        "/api/v1/notifications/digest",
        json!({ "email": "pat@example.com", "new_posts": 7, "weather_alerts": 2 }),
    )
    .await;
    assert_eq!(body["success"], json!(true));

    let requests = server.received_requests().await.expect("recording enabled");
    let sent: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    let text = sent["text"].as_str().expect("text");
    assert!(text.contains("- New posts: 7"));
    assert!(text.contains("- Weather alerts: 2"));
}

#[tokio::test]
async fn test_blank_recipient_is_rejected() {
    let (status, body) = post(
        app(MailSettings::default()),
        "/api/v1/notifications/test",
        json!({ "email": "  " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
}

#[tokio::test]
async fn test_alert_without_recipients_is_rejected() {
    let (status, _) = post(
        app(MailSettings::default()),
        "/api/v1/notifications/alert",
        json!({
            "recipients": [],
            "title": "Hail",
            "severity": "medium",
            "message": "Cover vehicles.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_reports_resolved_provider() {
    let (status, body) = get(app(MailSettings::default()), "/api/v1/email/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "provider": "none",
            "configured": false,
            "from": "RuralConnect <onboarding@resend.dev>",
        })
    );

    let server = MockServer::start().await;
    let (_, body) = get(app(resend(&server)), "/api/v1/email/status").await;
    assert_eq!(body["provider"], json!("hosted_api"));
    assert_eq!(body["configured"], json!(true));
}

#[tokio::test]
async fn test_preview_renders_without_sending() {
    let (status, body) = post(
        app(MailSettings::default()),
        "/api/v1/email/preview",
        json!({
            "kind": "welcome",
            "payload": { "email": "pat@example.com", "first_name": "Pat" },
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"], json!("Welcome to RuralConnect, Pat!"));
    assert!(body["html"].as_str().is_some_and(|h| !h.contains("Property Type:")));
}

#[tokio::test]
async fn test_health_includes_provider() {
    let (status, body) = get(app(MailSettings::default()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["email_provider"], json!("none"));
}
