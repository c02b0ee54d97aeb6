use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Failure of a single transport call.
///
/// Never leaves [`crate::mail::Mailer::send`]; it is folded into a
/// [`crate::models::DispatchOutcome`] there.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Provider rejected message ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Message build failed: {0}")]
    Build(String),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Template rendering failed: {0}")]
    Template(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
