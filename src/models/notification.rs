use serde::{Deserialize, Serialize};

/// Kinds of notification the app sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Welcome,
    Test,
    EmergencyAlert,
    Digest,
}

/// Data for the registration welcome email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WelcomePayload {
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
}

/// Data for the transport connectivity check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestPayload {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "Low",
            AlertSeverity::Medium => "Medium",
            AlertSeverity::High => "High",
            AlertSeverity::Critical => "Critical",
        }
    }
}

/// Data for an emergency alert broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPayload {
    pub title: String,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub issued_by: Option<String>,
}

/// Counters for the community activity digest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestPayload {
    #[serde(default)]
    pub first_name: Option<String>,
    /// e.g. "this week"
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub new_posts: u64,
    #[serde(default)]
    pub help_requests: u64,
    #[serde(default)]
    pub equipment_shares: u64,
    #[serde(default)]
    pub weather_alerts: u64,
}

/// A notification kind together with its payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    Welcome(WelcomePayload),
    Test(TestPayload),
    EmergencyAlert(AlertPayload),
    Digest(DigestPayload),
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Welcome(_) => NotificationKind::Welcome,
            Notification::Test(_) => NotificationKind::Test,
            Notification::EmergencyAlert(_) => NotificationKind::EmergencyAlert,
            Notification::Digest(_) => NotificationKind::Digest,
        }
    }
}

/// One dispatch: who receives it and what to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub recipients: Vec<String>,
    pub notification: Notification,
}

/// Rendered email content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Normalized result of a single dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DispatchOutcome {
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            provider_message_id: Some(message_id.into()),
            error_detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            provider_message_id: None,
            error_detail: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_notification_deserializes_from_tagged_json() {
        let json = r#"{
            "kind": "emergency_alert",
            "payload": {
                "title": "Flooding on Route 9",
                "severity": "critical",
                "message": "Avoid the low-water crossing."
            }
        }"#;

        let notification: Notification = serde_json::from_str(json).expect("Should parse");
        assert_eq!(notification.kind(), NotificationKind::EmergencyAlert);

        match notification {
            Notification::EmergencyAlert(alert) => {
                assert_eq!(alert.severity, AlertSeverity::Critical);
                assert!(alert.location.is_none());
            }
            other => panic!("unexpected notification: {:?}", other),
        }
    }

    #[test]
    fn test_outcome_omits_absent_fields() {
        let value = serde_json::to_value(DispatchOutcome::delivered("msg_1")).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "provider_message_id": "msg_1" })
        );

        let value = serde_json::to_value(DispatchOutcome::failed("boom")).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "success": false, "error_detail": "boom" })
        );
    }
}
