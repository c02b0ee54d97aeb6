pub mod notification;

pub use notification::{
    AlertPayload,
    AlertSeverity,
    DigestPayload,
    DispatchOutcome,
    Notification,
    NotificationKind,
    NotificationRequest,
    RenderedMessage,
    TestPayload,
    WelcomePayload,
};
