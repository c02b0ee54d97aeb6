use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::mail::ProviderKind;
use crate::models::{Notification, RenderedMessage};
use crate::state::AppState;

/// Email diagnostics routes
pub fn email_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(email_status))
        .route("/preview", post(preview))
}

#[derive(Debug, Serialize)]
pub struct EmailStatusResponse {
    pub provider: ProviderKind,
    pub configured: bool,
    pub from: String,
}

/// GET /api/v1/email/status - Which provider is active
async fn email_status(State(state): State<AppState>) -> Json<EmailStatusResponse> {
    let provider = state.mailer.provider_kind();
    Json(EmailStatusResponse {
        provider,
        configured: provider != ProviderKind::None,
        from: state.mailer.from_address().to_string(),
    })
}

/// POST /api/v1/email/preview - Render a notification without sending it
async fn preview(
    State(state): State<AppState>,
    Json(notification): Json<Notification>,
) -> Result<Json<RenderedMessage>> {
    let message = state
        .mailer
        .renderer()
        .render(&notification)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(Json(message))
}
