//! Notifier adapters.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{Notification, NotificationLevel, Notifier, NotifierError};

/// Notifier that writes each notification as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError> {
        match notification.level {
            NotificationLevel::Success => info!(text = %notification.message, "notification"),
            NotificationLevel::Error => error!(text = %notification.message, "notification"),
        }
        Ok(())
    }
}

/// Notifier that keeps every notification in memory, in delivery order.
///
/// A UI toast layer drains it with [`RecordingNotifier::take`].
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything delivered so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything delivered so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .delivered
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}
