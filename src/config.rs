use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub app_name: String,
    pub app_url: String,
    pub mail: MailSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "RuralConnect".to_string()),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            mail: MailSettings::from_lookup(|key| env::var(key).ok())?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Raw email provider slots, as read from configuration.
///
/// Every field is optional; which provider (if any) is used is decided by
/// [`crate::mail::provider::resolve_provider`].
#[derive(Clone, Default)]
pub struct MailSettings {
    pub from: Option<String>,
    pub gmail_user: Option<String>,
    pub gmail_app_password: Option<String>,
    pub resend_api_key: Option<String>,
    pub resend_api_url: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
}

impl MailSettings {
    /// Build settings from any key/value source. Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let smtp_port = match get("SMTP_PORT") {
            Some(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidSmtpPort(raw))?),
            None => None,
        };

        Ok(MailSettings {
            from: get("MAIL_FROM"),
            gmail_user: get("GMAIL_USER"),
            gmail_app_password: get("GMAIL_APP_PASSWORD"),
            resend_api_key: get("RESEND_API_KEY"),
            resend_api_url: get("RESEND_API_URL"),
            smtp_host: get("SMTP_HOST"),
            smtp_port,
            smtp_username: get("SMTP_USER"),
            smtp_password: get("SMTP_PASSWORD"),
        })
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("MailSettings")
            .field("from", &self.from)
            .field("gmail_user", &self.gmail_user)
            .field("gmail_app_password", &redact(&self.gmail_app_password))
            .field("resend_api_key", &redact(&self.resend_api_key))
            .field("resend_api_url", &self.resend_api_url)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &redact(&self.smtp_password))
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid SMTP_PORT value: {0}")]
    InvalidSmtpPort(String),
}
