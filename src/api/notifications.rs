use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{AlertPayload, DigestPayload, DispatchOutcome, WelcomePayload};
use crate::state::AppState;

/// Notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/welcome", post(send_welcome))
        .route("/test", post(send_test))
        .route("/alert", post(send_alert))
        .route("/digest", post(send_digest))
}

#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AlertBroadcastRequest {
    pub recipients: Vec<String>,
    #[serde(flatten)]
    pub alert: AlertPayload,
}

#[derive(Debug, Deserialize)]
pub struct DigestRequest {
    pub email: String,
    #[serde(flatten)]
    pub digest: DigestPayload,
}

/// Address syntax is left to the provider; only blank input is refused here.
fn require_address(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("Recipient email is required".to_string()));
    }
    Ok(email.to_string())
}

/// POST /api/v1/notifications/welcome - Registration welcome email
async fn send_welcome(
    State(state): State<AppState>,
    Json(mut payload): Json<WelcomePayload>,
) -> Result<Json<DispatchOutcome>> {
    payload.email = require_address(&payload.email)?;
    if payload.first_name.trim().is_empty() {
        return Err(AppError::BadRequest("First name is required".to_string()));
    }

    Ok(Json(state.mailer.send_welcome(payload).await))
}

/// POST /api/v1/notifications/test - Email configuration test
async fn send_test(
    State(state): State<AppState>,
    Json(request): Json<TestEmailRequest>,
) -> Result<Json<DispatchOutcome>> {
    let email = require_address(&request.email)?;
    Ok(Json(state.mailer.send_test(&email).await))
}

/// POST /api/v1/notifications/alert - Emergency alert broadcast
async fn send_alert(
    State(state): State<AppState>,
    Json(request): Json<AlertBroadcastRequest>,
) -> Result<Json<DispatchOutcome>> {
    if request.recipients.is_empty() {
        return Err(AppError::BadRequest(
            "At least one recipient is required".to_string(),
        ));
    }
    if request.alert.title.trim().is_empty() {
        return Err(AppError::BadRequest("Alert title is required".to_string()));
    }

    let recipients = request
        .recipients
        .iter()
        .map(|r| require_address(r))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        title = %request.alert.title,
        severity = request.alert.severity.label(),
        recipients = recipients.len(),
        "Broadcasting emergency alert"
    );

    Ok(Json(state.mailer.send_alert(recipients, request.alert).await))
}

/// POST /api/v1/notifications/digest - Community activity digest
async fn send_digest(
    State(state): State<AppState>,
    Json(request): Json<DigestRequest>,
) -> Result<Json<DispatchOutcome>> {
    let email = require_address(&request.email)?;
    Ok(Json(state.mailer.send_digest(&email, request.digest).await))
}
