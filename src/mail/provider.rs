//! Outbound provider selection.
//!
//! Slots are checked in a fixed order and the first one with every required
//! field wins:
//!
//! 1. Direct account (`GMAIL_USER`, `GMAIL_APP_PASSWORD`)
//! 2. Hosted API (`RESEND_API_KEY`)
//! 3. Generic SMTP (`SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASSWORD`)
//!
//! No satisfied slot resolves to [`ProviderConfig::None`], which is a valid
//! state (development mode), not an error.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::MailSettings;

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    None,
    DirectAccount,
    HostedApi,
    GenericSmtp,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::None => "none",
            ProviderKind::DirectAccount => "direct_account",
            ProviderKind::HostedApi => "hosted_api",
            ProviderKind::GenericSmtp => "generic_smtp",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    None,
    DirectAccount {
        user: String,
        app_password: String,
    },
    HostedApi {
        api_key: String,
        base_url: String,
    },
    GenericSmtp {
        host: String,
        port: u16,
        username: String,
        password: String,
    },
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::None => ProviderKind::None,
            ProviderConfig::DirectAccount { .. } => ProviderKind::DirectAccount,
            ProviderConfig::HostedApi { .. } => ProviderKind::HostedApi,
            ProviderConfig::GenericSmtp { .. } => ProviderKind::GenericSmtp,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, ProviderConfig::None)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::None => f.write_str("None"),
            ProviderConfig::DirectAccount { user, .. } => f
                .debug_struct("DirectAccount")
                .field("user", user)
                .finish_non_exhaustive(),
            ProviderConfig::HostedApi { base_url, .. } => f
                .debug_struct("HostedApi")
                .field("base_url", base_url)
                .finish_non_exhaustive(),
            ProviderConfig::GenericSmtp {
                host,
                port,
                username,
                ..
            } => f
                .debug_struct("GenericSmtp")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// Pick the first satisfied provider slot.
pub fn resolve_provider(settings: &MailSettings) -> ProviderConfig {
    if let (Some(user), Some(app_password)) = (&settings.gmail_user, &settings.gmail_app_password)
    {
        return ProviderConfig::DirectAccount {
            user: user.clone(),
            app_password: app_password.clone(),
        };
    }

    if let Some(api_key) = &settings.resend_api_key {
        return ProviderConfig::HostedApi {
            api_key: api_key.clone(),
            base_url: settings
                .resend_api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
        };
    }

    if let (Some(host), Some(port), Some(username), Some(password)) = (
        &settings.smtp_host,
        settings.smtp_port,
        &settings.smtp_username,
        &settings.smtp_password,
    ) {
        return ProviderConfig::GenericSmtp {
            host: host.clone(),
            port,
            username: username.clone(),
            password: password.clone(),
        };
    }

    ProviderConfig::None
}

/// Resolves the provider once and hands out the cached result afterwards.
#[derive(Debug)]
pub struct ProviderResolver {
    settings: MailSettings,
    resolved: OnceLock<ProviderConfig>,
}

impl ProviderResolver {
    pub fn new(settings: MailSettings) -> Self {
        Self {
            settings,
            resolved: OnceLock::new(),
        }
    }

    pub fn resolve(&self) -> &ProviderConfig {
        self.resolved.get_or_init(|| {
            let provider = resolve_provider(&self.settings);
            tracing::info!(provider = %provider.kind(), "Email provider resolved");
            provider
        })
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }
}
