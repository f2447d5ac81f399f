//! Port for transient user-facing notifications ("toasts").
//!
//! The mutation service reports outcomes through this port without knowing
//! how they are shown. Delivery failures never change a mutation's outcome.

use async_trait::async_trait;
use serde::Serialize;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when delivering a notification.
    pub enum NotifierError {
        /// Notification sink rejected the message.
        Delivery { message: String } => "notification delivery failed: {message}",
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// The action completed.
    Success,
    /// The action failed and was rolled back.
    Error,
}

/// One transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Port delivering notifications to the user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError>;
}

/// Notifier that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, _notification: Notification) -> Result<(), NotifierError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_op_notifier_accepts_everything() {
        NoOpNotifier
            .notify(Notification::error("boom"))
            .await
            .expect("no-op delivery succeeds");
    }

    #[test]
    fn notification_serialises_level_in_lowercase() {
        let value = serde_json::to_value(Notification::success("saved")).expect("serialise");
        assert_eq!(value["level"], "success");
        assert_eq!(value["message"], "saved");
    }
}
