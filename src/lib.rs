pub mod api;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod state;
pub mod templates;

pub use config::Config;
pub use error::{AppError, MailError, Result};
pub use mail::Mailer;
pub use state::AppState;
