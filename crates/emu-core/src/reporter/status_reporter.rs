use crate::reporter::{Notification, Severity};

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

struct Visible {
    notification: Notification,
    dismiss_at: Instant,
}

/// Queue of currently visible notifications.
///
/// Every notification is shown for the same fixed duration, so the queue
/// is always ordered by dismissal time and expires oldest first.
pub struct StatusReporter {
    display: Duration,
    visible: VecDeque<Visible>,
    subscribers: Vec<mpsc::UnboundedSender<Notification>>,
}

impl StatusReporter {
    pub fn new(display: Duration) -> Self {
        Self {
            display,
            visible: VecDeque::new(),
            subscribers: Vec::new(),
        }
    }

    /// Receive every notification from now on, in emission order.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Notification> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn notify<S: Into<String>>(&mut self, message: S, severity: Severity) -> Notification {
        let notification = Notification {
            message: message.into(),
            severity,
            timestamp: Utc::now(),
        };
        debug!("Notification ({severity}): {}", notification.message);

        self.dismiss_expired();
        self.visible.push_back(Visible {
            notification: notification.clone(),
            dismiss_at: Instant::now() + self.display,
        });
        self.subscribers
            .retain(|tx| tx.send(notification.clone()).is_ok());

        notification
    }

    /// Drop notifications whose display time is over and return them.
    pub fn dismiss_expired(&mut self) -> Vec<Notification> {
        let now = Instant::now();
        let mut dismissed = Vec::new();
        while let Some(front) = self.visible.front() {
            if front.dismiss_at > now {
                break;
            }
            if let Some(expired) = self.visible.pop_front() {
                dismissed.push(expired.notification);
            }
        }
        dismissed
    }

    /// Notifications still on screen, oldest first.
    pub fn visible(&mut self) -> Vec<Notification> {
        self.dismiss_expired();
        self.visible
            .iter()
            .map(|v| v.notification.clone())
            .collect()
    }
}
