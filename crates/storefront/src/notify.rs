//! Transient user notifications (toasts).
//!
//! Cart mutations and form submissions emit fire-and-forget messages here.
//! Notifications stack, are never de-duplicated, and have no effect on
//! domain state. Page controllers drain the pending queue and ship it to
//! the view along with the fixed display duration, after which the client
//! auto-dismisses.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

/// How long a toast stays visible before auto-dismissing.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Notification severity, which the view maps to toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A single transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Collects pending notifications between mutation and render.
#[derive(Default)]
pub struct Notifier {
    pending: Mutex<Vec<Notification>>,
}

impl Notifier {
    /// Create an emitter with no pending notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification. Fire-and-forget; never fails.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification {
            message: message.into(),
            severity,
        };
        tracing::debug!(message = %notification.message, ?severity, "Notification queued");

        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notification);
    }

    /// Take all pending notifications, leaving the queue empty.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .pending
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_stack_in_order() {
        let notifier = Notifier::new();
        notifier.notify("Laptop added to cart!", Severity::Success);
        notifier.notify("Watch removed from cart.", Severity::Error);

        let pending = notifier.drain();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].message, "Laptop added to cart!");
        assert_eq!(pending[0].severity, Severity::Success);
        assert_eq!(pending[1].severity, Severity::Error);
    }

    #[test]
    fn test_drain_empties_the_queue() {
        let notifier = Notifier::new();
        notifier.notify("once", Severity::Success);

        assert_eq!(notifier.drain().len(), 1);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let notifier = Notifier::new();
        notifier.notify("same", Severity::Success);
        notifier.notify("same", Severity::Success);

        assert_eq!(notifier.drain().len(), 2);
    }
}
